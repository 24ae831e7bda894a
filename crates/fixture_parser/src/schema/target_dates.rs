use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Weekday};

/// Calendar renderings tried when searching a page for a date, most specific first.
const DATE_FORMATS: &[&str] = &["%B %-d, %Y", "%b %-d, %Y", "%b %d, %Y", "%A, %B %-d, %Y", "%m/%d/%Y", "%-m/%-d/%Y", "%Y-%m-%d"];

/// Year-less renderings, only used to recognise a mention inside a fixture's context.
const MENTION_FORMATS: &[&str] = &["%A, %B %-d", "%B %-d", "%b %-d", "%-m/%-d"];

/// One textual rendering of a target date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateForm {
	pub date: NaiveDate,
	pub text: String,
}

/// The Saturday and Sunday whose fixtures are wanted.
///
/// Computed from an injected reference time so nothing downstream reads the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDates {
	saturday: NaiveDate,
	sunday: NaiveDate,
}

impl TargetDates {
	pub const fn new(saturday: NaiveDate, sunday: NaiveDate) -> Self {
		Self { saturday, sunday }
	}

	/// Next Saturday and next Sunday as seen from `reference` in its own offset.
	/// A reference that already falls on one of those days counts as that day.
	pub fn upcoming_weekend(reference: DateTime<FixedOffset>) -> Self {
		let today = reference.date_naive();
		Self {
			saturday: next_weekday(today, Weekday::Sat),
			sunday: next_weekday(today, Weekday::Sun),
		}
	}

	/// Same as [`Self::upcoming_weekend`], reading the reference from a UTC offset in hours.
	pub fn upcoming_weekend_at(now_utc: DateTime<chrono::Utc>, utc_offset_hours: i32) -> Option<Self> {
		let offset = FixedOffset::east_opt(utc_offset_hours.checked_mul(3600)?)?;
		Some(Self::upcoming_weekend(now_utc.with_timezone(&offset)))
	}

	pub const fn saturday(&self) -> NaiveDate {
		self.saturday
	}

	pub const fn sunday(&self) -> NaiveDate {
		self.sunday
	}

	pub fn contains(&self, date: NaiveDate) -> bool {
		date == self.saturday || date == self.sunday
	}

	/// Every rendering of both dates, Saturday first.
	pub fn forms(&self) -> Vec<DateForm> {
		[self.saturday, self.sunday]
			.into_iter()
			.flat_map(|date| date_forms(date).into_iter().map(move |text| DateForm { date, text }))
			.collect()
	}

	/// Year-less renderings of both dates (`Saturday, August 30`, `Aug 30`, `8/30`), Saturday first.
	pub fn mention_forms(&self) -> Vec<DateForm> {
		[self.saturday, self.sunday]
			.into_iter()
			.flat_map(|date| MENTION_FORMATS.iter().map(move |format| DateForm { date, text: date.format(format).to_string() }))
			.collect()
	}
}

/// Distinct textual renderings of `date`, e.g. `August 30, 2025`, `Aug 30, 2025`, `08/30/2025`.
pub fn date_forms(date: NaiveDate) -> Vec<String> {
	let mut forms: Vec<String> = Vec::with_capacity(DATE_FORMATS.len());
	for format in DATE_FORMATS {
		let text = date.format(format).to_string();
		if !forms.contains(&text) {
			forms.push(text);
		}
	}
	forms
}

fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
	let ahead = (7 + i64::from(target.num_days_from_monday()) - i64::from(from.weekday().num_days_from_monday())) % 7;
	from + Duration::days(ahead)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn pacific(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
		FixedOffset::west_opt(7 * 3600).unwrap().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
	}

	#[test]
	fn test_weekend_from_midweek() {
		let dates = TargetDates::upcoming_weekend(pacific(2025, 8, 27, 12));
		assert_eq!(dates.saturday(), NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());
		assert_eq!(dates.sunday(), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
	}

	#[test]
	fn test_weekend_on_saturday_and_sunday() {
		let on_saturday = TargetDates::upcoming_weekend(pacific(2025, 8, 30, 9));
		assert_eq!(on_saturday.saturday(), NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());
		assert_eq!(on_saturday.sunday(), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());

		let on_sunday = TargetDates::upcoming_weekend(pacific(2025, 8, 31, 9));
		assert_eq!(on_sunday.sunday(), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
		assert_eq!(on_sunday.saturday(), NaiveDate::from_ymd_opt(2025, 9, 6).unwrap());
	}

	#[test]
	fn test_offset_changes_the_local_day() {
		// Sunday 03:00 UTC is still Saturday evening on the west coast.
		let now = chrono::Utc.with_ymd_and_hms(2025, 8, 31, 3, 0, 0).unwrap();
		let dates = TargetDates::upcoming_weekend_at(now, -7).unwrap();
		assert_eq!(dates.saturday(), NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());

		assert!(TargetDates::upcoming_weekend_at(now, 99).is_none());
	}

	#[test]
	fn test_date_forms_are_distinct() {
		let forms = date_forms(NaiveDate::from_ymd_opt(2025, 9, 6).unwrap());
		assert_eq!(
			forms,
			vec!["September 6, 2025", "Sep 6, 2025", "Sep 06, 2025", "Saturday, September 6, 2025", "09/06/2025", "9/6/2025", "2025-09-06"]
		);

		let late = date_forms(NaiveDate::from_ymd_opt(2025, 8, 30).unwrap());
		assert_eq!(late.iter().filter(|f| f.as_str() == "Aug 30, 2025").count(), 1);
	}

	#[test]
	fn test_forms_cover_both_days() {
		let dates = TargetDates::new(NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(), NaiveDate::from_ymd_opt(2025, 8, 31).unwrap());
		let forms = dates.forms();
		assert_eq!(forms.first().unwrap().date, dates.saturday());
		assert!(forms.iter().any(|f| f.text == "Aug 31, 2025" && f.date == dates.sunday()));

		let mentions: Vec<String> = dates.mention_forms().into_iter().map(|f| f.text).collect();
		assert_eq!(mentions[..4], ["Saturday, August 30", "August 30", "Aug 30", "8/30"]);
	}
}
