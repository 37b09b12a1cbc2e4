use common::{BookingError, Error};
use db::BookingStatus;
use rules::{
	Actor,
	Transition,
	cancel_transition,
	check_booking_access,
	check_editable,
	check_staff_access,
	confirm_transition,
};

fn owner() -> Actor { Actor { profile_id: 1, is_staff: false } }

fn staff() -> Actor { Actor { profile_id: 2, is_staff: true } }

fn stranger() -> Actor { Actor { profile_id: 3, is_staff: false } }

#[test]
fn cancel_covers_every_status() {
	assert_eq!(
		cancel_transition(BookingStatus::Pending).unwrap(),
		Transition::Apply(BookingStatus::Cancelled)
	);
	assert_eq!(
		cancel_transition(BookingStatus::Confirmed).unwrap(),
		Transition::Apply(BookingStatus::Cancelled)
	);
	assert_eq!(
		cancel_transition(BookingStatus::Cancelled).unwrap(),
		Transition::AlreadyDone
	);
}

#[test]
fn confirm_covers_every_status() {
	assert_eq!(
		confirm_transition(BookingStatus::Pending).unwrap(),
		Transition::Apply(BookingStatus::Confirmed)
	);
	assert_eq!(
		confirm_transition(BookingStatus::Confirmed).unwrap(),
		Transition::AlreadyDone
	);
	assert!(matches!(
		confirm_transition(BookingStatus::Cancelled),
		Err(Error::BookingError(BookingError::BookingFinalized))
	));
}

#[test]
fn cancelled_bookings_cannot_change() {
	assert!(check_editable(BookingStatus::Pending).is_ok());
	assert!(check_editable(BookingStatus::Confirmed).is_ok());
	assert!(matches!(
		check_editable(BookingStatus::Cancelled),
		Err(Error::BookingError(BookingError::BookingFinalized))
	));
}

#[test]
fn cancelling_twice_is_not_an_error() {
	let first = cancel_transition(BookingStatus::Pending).unwrap();
	assert_eq!(first, Transition::Apply(BookingStatus::Cancelled));

	let second = cancel_transition(BookingStatus::Cancelled).unwrap();
	assert_eq!(second, Transition::AlreadyDone);
}

#[test]
fn owners_and_staff_may_manage_a_booking() {
	assert!(check_booking_access(owner(), 1).is_ok());
	assert!(check_booking_access(staff(), 1).is_ok());
}

#[test]
fn strangers_may_not_manage_a_booking() {
	assert!(matches!(
		check_booking_access(stranger(), 1),
		Err(Error::Forbidden)
	));
}

#[test]
fn only_staff_pass_the_staff_check() {
	assert!(check_staff_access(staff()).is_ok());
	assert!(matches!(check_staff_access(owner()), Err(Error::Forbidden)));
	assert!(matches!(
		check_staff_access(stranger()),
		Err(Error::Forbidden)
	));
}

#[test]
fn staff_keep_access_to_their_own_bookings() {
	assert!(check_booking_access(staff(), 2).is_ok());
}
