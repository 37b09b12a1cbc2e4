use chrono::{NaiveDate, NaiveTime};
use common::{BookingError, Error};
use rules::{
	BookingCandidate,
	BookingPolicy,
	RestaurantHours,
	TableState,
	check_booking,
	check_capacity_shrink,
	check_operating_hours,
	check_table_occupancy,
	check_time_window,
};

fn hours() -> RestaurantHours {
	RestaurantHours {
		opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
		closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
	}
}

fn table(capacity: i32, is_active: bool) -> TableState {
	TableState { capacity, is_active }
}

fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 6, 15).unwrap() }

fn candidate(date: NaiveDate, hour: u32, guests: i32) -> BookingCandidate {
	BookingCandidate {
		date,
		time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
		number_of_guests: guests,
	}
}

fn tomorrow() -> NaiveDate { today().succ_opt().unwrap() }

fn yesterday() -> NaiveDate { today().pred_opt().unwrap() }

#[test]
fn full_table_booking_within_hours_is_accepted() {
	let result = check_booking(
		hours(),
		Some(table(4, true)),
		candidate(tomorrow(), 12, 4),
		today(),
		BookingPolicy::default(),
	);

	assert!(result.is_ok());
}

#[test]
fn party_larger_than_the_table_is_rejected() {
	let result = check_booking(
		hours(),
		Some(table(4, true)),
		candidate(tomorrow(), 12, 5),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::CapacityExceeded(4)))
	));
}

#[test]
fn past_date_is_rejected() {
	let result = check_booking(
		hours(),
		Some(table(4, true)),
		candidate(yesterday(), 12, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::PastDate(_)))
	));
}

#[test]
fn booking_for_the_current_date_is_accepted() {
	let result = check_booking(
		hours(),
		None,
		candidate(today(), 12, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(result.is_ok());
}

#[test]
fn booking_before_opening_is_rejected() {
	let result = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 8, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::OutOfHours { .. }))
	));
}

#[test]
fn booking_after_closing_is_rejected() {
	let result = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 23, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::OutOfHours { .. }))
	));
}

#[test]
fn boundary_times_are_accepted() {
	let at_open = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 9, 2),
		today(),
		BookingPolicy::default(),
	);
	let at_close = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 22, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(at_open.is_ok());
	assert!(at_close.is_ok());
}

#[test]
fn out_of_hours_reports_the_opening_hours() {
	let result = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 23, 2),
		today(),
		BookingPolicy::default(),
	);

	let Err(Error::BookingError(BookingError::OutOfHours { open, close })) =
		result
	else {
		panic!("expected an out of hours rejection, got {result:?}");
	};

	assert_eq!(open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
	assert_eq!(close, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
}

#[test]
fn party_size_outside_the_policy_is_rejected() {
	let too_few = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 12, 0),
		today(),
		BookingPolicy::default(),
	);
	let too_many = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 12, 9),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		too_few,
		Err(Error::BookingError(BookingError::GuestCountOutOfRange {
			min: 1,
			max: 8,
		}))
	));
	assert!(matches!(
		too_many,
		Err(Error::BookingError(BookingError::GuestCountOutOfRange {
			..
		}))
	));
}

#[test]
fn policy_bounds_are_inclusive() {
	let at_min = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 12, 1),
		today(),
		BookingPolicy::default(),
	);
	let at_max = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 12, 8),
		today(),
		BookingPolicy::default(),
	);

	assert!(at_min.is_ok());
	assert!(at_max.is_ok());
}

#[test]
fn a_widened_policy_accepts_larger_parties() {
	let policy = BookingPolicy { min_guests: 2, max_guests: 20 };

	let result = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 12, 15),
		today(),
		policy,
	);

	assert!(result.is_ok());
}

#[test]
fn inactive_table_is_rejected() {
	let result = check_booking(
		hours(),
		Some(table(4, false)),
		candidate(tomorrow(), 12, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::InactiveTable))
	));
}

#[test]
fn hours_violation_wins_over_past_date() {
	let result = check_booking(
		hours(),
		None,
		candidate(yesterday(), 23, 2),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::OutOfHours { .. }))
	));
}

#[test]
fn capacity_violation_wins_over_party_size() {
	// 9 guests break both the table capacity and the default policy, the
	// capacity rule is checked first
	let result = check_booking(
		hours(),
		Some(table(4, true)),
		candidate(tomorrow(), 12, 9),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::CapacityExceeded(4)))
	));
}

#[test]
fn capacity_violation_wins_over_inactive_table() {
	let result = check_booking(
		hours(),
		Some(table(4, false)),
		candidate(tomorrow(), 12, 5),
		today(),
		BookingPolicy::default(),
	);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::CapacityExceeded(4)))
	));
}

#[test]
fn bookings_without_a_table_skip_table_rules() {
	let result = check_booking(
		hours(),
		None,
		candidate(tomorrow(), 12, 8),
		today(),
		BookingPolicy::default(),
	);

	assert!(result.is_ok());
}

#[test]
fn overlay_keeps_absent_fields() {
	let base = candidate(tomorrow(), 12, 4);

	let merged = base.overlay(None, None, Some(6));

	assert_eq!(merged.date, base.date);
	assert_eq!(merged.time, base.time);
	assert_eq!(merged.number_of_guests, 6);
}

#[test]
fn overlay_replaces_provided_fields() {
	let base = candidate(tomorrow(), 12, 4);
	let new_time = NaiveTime::from_hms_opt(19, 30, 0).unwrap();

	let merged = base.overlay(Some(yesterday()), Some(new_time), None);

	assert_eq!(merged.date, yesterday());
	assert_eq!(merged.time, new_time);
	assert_eq!(merged.number_of_guests, 4);
}

#[test]
fn operating_hours_must_open_before_closing() {
	let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
	let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

	assert!(check_operating_hours(nine, ten).is_ok());
	assert!(matches!(
		check_operating_hours(ten, nine),
		Err(Error::ValidationError(_))
	));
	assert!(matches!(
		check_operating_hours(nine, nine),
		Err(Error::ValidationError(_))
	));
}

#[test]
fn time_windows_must_start_before_ending() {
	let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
	let two = NaiveTime::from_hms_opt(14, 0, 0).unwrap();

	assert!(check_time_window(noon, two).is_ok());
	assert!(matches!(
		check_time_window(two, noon),
		Err(Error::ValidationError(_))
	));
	assert!(matches!(
		check_time_window(noon, noon),
		Err(Error::ValidationError(_))
	));
}

#[test]
fn shrinking_below_the_largest_booked_party_is_rejected() {
	let result = check_capacity_shrink(Some(6), 4);

	let Err(Error::ValidationError(message)) = result else {
		panic!("expected a validation rejection, got {result:?}");
	};

	assert!(message.contains("6 guests"));
}

#[test]
fn shrinking_down_to_the_largest_booked_party_is_accepted() {
	assert!(check_capacity_shrink(Some(4), 4).is_ok());
}

#[test]
fn shrinking_an_unbooked_table_is_accepted() {
	assert!(check_capacity_shrink(None, 1).is_ok());
}

#[test]
fn occupancy_up_to_capacity_is_accepted() {
	assert!(check_table_occupancy(4, 0, 4).is_ok());
	assert!(check_table_occupancy(4, 2, 2).is_ok());
}

#[test]
fn occupancy_past_capacity_is_rejected() {
	let result = check_table_occupancy(4, 2, 3);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::CapacityExceeded(4)))
	));
}

#[test]
fn a_full_table_rejects_any_further_party() {
	let result = check_table_occupancy(4, 4, 1);

	assert!(matches!(
		result,
		Err(Error::BookingError(BookingError::CapacityExceeded(4)))
	));
}
