use chrono::{NaiveDate, NaiveTime};
use common::{BookingError, Error};

/// Bounds on the accepted party size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingPolicy {
	pub min_guests: i32,
	pub max_guests: i32,
}

impl Default for BookingPolicy {
	fn default() -> Self { Self { min_guests: 1, max_guests: 8 } }
}

/// The restaurant fields the availability check consults
#[derive(Clone, Copy, Debug)]
pub struct RestaurantHours {
	pub opening_time: NaiveTime,
	pub closing_time: NaiveTime,
}

/// The table fields the availability check consults
#[derive(Clone, Copy, Debug)]
pub struct TableState {
	pub capacity:  i32,
	pub is_active: bool,
}

/// A booking request before it is persisted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookingCandidate {
	pub date:             NaiveDate,
	pub time:             NaiveTime,
	pub number_of_guests: i32,
}

impl BookingCandidate {
	/// Overlay any provided fields on top of this candidate
	///
	/// Absent fields keep their current value, so a partial update is
	/// checked exactly as the booking would be stored.
	#[must_use]
	pub fn overlay(
		self,
		date: Option<NaiveDate>,
		time: Option<NaiveTime>,
		number_of_guests: Option<i32>,
	) -> Self {
		Self {
			date:             date.unwrap_or(self.date),
			time:             time.unwrap_or(self.time),
			number_of_guests: number_of_guests
				.unwrap_or(self.number_of_guests),
		}
	}
}

/// Check a candidate against the restaurant, the requested table, and the
/// party-size policy
///
/// `today` is the restaurants current local date and must be derived from
/// its stored UTC offset, never from the server clock. The checks run in a
/// fixed order and the first violated rule wins.
pub fn check_booking(
	restaurant: RestaurantHours,
	table: Option<TableState>,
	candidate: BookingCandidate,
	today: NaiveDate,
	policy: BookingPolicy,
) -> Result<(), Error> {
	check_booking_hours(
		restaurant.opening_time,
		restaurant.closing_time,
		candidate.time,
	)?;
	check_booking_date(candidate.date, today)?;
	check_table_capacity(table, candidate.number_of_guests)?;
	check_party_size(policy, candidate.number_of_guests)?;
	check_table_active(table)?;

	Ok(())
}

fn check_booking_hours(
	opening_time: NaiveTime,
	closing_time: NaiveTime,
	time: NaiveTime,
) -> Result<(), Error> {
	// Booking exactly at opening or closing time is allowed
	if time < opening_time || time > closing_time {
		return Err(BookingError::OutOfHours {
			open:  opening_time,
			close: closing_time,
		}
		.into());
	}

	Ok(())
}

fn check_booking_date(date: NaiveDate, today: NaiveDate) -> Result<(), Error> {
	if date < today {
		return Err(BookingError::PastDate(today).into());
	}

	Ok(())
}

fn check_table_capacity(
	table: Option<TableState>,
	guests: i32,
) -> Result<(), Error> {
	if let Some(table) = table
		&& guests > table.capacity
	{
		return Err(BookingError::CapacityExceeded(table.capacity).into());
	}

	Ok(())
}

fn check_party_size(policy: BookingPolicy, guests: i32) -> Result<(), Error> {
	if guests < policy.min_guests || guests > policy.max_guests {
		return Err(BookingError::GuestCountOutOfRange {
			min: policy.min_guests,
			max: policy.max_guests,
		}
		.into());
	}

	Ok(())
}

fn check_table_active(table: Option<TableState>) -> Result<(), Error> {
	if let Some(table) = table
		&& !table.is_active
	{
		return Err(BookingError::InactiveTable.into());
	}

	Ok(())
}

/// Check that a restaurant opens before it closes
pub fn check_operating_hours(
	opening_time: NaiveTime,
	closing_time: NaiveTime,
) -> Result<(), Error> {
	if opening_time >= closing_time {
		return Err(Error::ValidationError(
			"opening time must fall before closing time".to_string(),
		));
	}

	Ok(())
}

/// Check that a time slot starts before it ends
pub fn check_time_window(
	start_time: NaiveTime,
	end_time: NaiveTime,
) -> Result<(), Error> {
	if start_time >= end_time {
		return Err(Error::ValidationError(
			"start time must fall before end time".to_string(),
		));
	}

	Ok(())
}

/// Reject a new table capacity that no longer fits the largest live
/// upcoming party booked on it
///
/// `largest_party` is the biggest party size among the non-cancelled
/// bookings holding the table from its current local date on, read under a
/// row lock on the table.
pub fn check_capacity_shrink(
	largest_party: Option<i32>,
	capacity: i32,
) -> Result<(), Error> {
	if let Some(largest_party) = largest_party
		&& largest_party > capacity
	{
		return Err(Error::ValidationError(format!(
			"a booking for {largest_party} guests still holds this table",
		)));
	}

	Ok(())
}

/// Reject a candidate that would push the combined party size of all live
/// bookings on the same table, date, and time past the tables capacity
///
/// `seated_guests` is the summed party size of every non-cancelled booking
/// already holding the slot, read under a row lock on the table.
pub fn check_table_occupancy(
	capacity: i32,
	seated_guests: i64,
	guests: i32,
) -> Result<(), Error> {
	if seated_guests + i64::from(guests) > i64::from(capacity) {
		return Err(BookingError::CapacityExceeded(capacity).into());
	}

	Ok(())
}
