use common::{BookingError, Error};
use db::BookingStatus;

/// The identity a request acts under
#[derive(Clone, Copy, Debug)]
pub struct Actor {
	pub profile_id: i32,
	pub is_staff:   bool,
}

impl Actor {
	/// Whether this actor owns a booking held by `owner_id` or carries the
	/// staff flag
	#[must_use]
	pub fn may_manage(&self, owner_id: i32) -> bool {
		self.is_staff || self.profile_id == owner_id
	}
}

/// Check that `actor` owns the booking or carries the staff flag
pub fn check_booking_access(actor: Actor, owner_id: i32) -> Result<(), Error> {
	if !actor.may_manage(owner_id) {
		return Err(Error::Forbidden);
	}

	Ok(())
}

/// Check that `actor` carries the staff flag
pub fn check_staff_access(actor: Actor) -> Result<(), Error> {
	if !actor.is_staff {
		return Err(Error::Forbidden);
	}

	Ok(())
}

/// Check that a booking may still change
///
/// Cancelled is terminal, everything else is editable.
pub fn check_editable(status: BookingStatus) -> Result<(), Error> {
	match status {
		BookingStatus::Cancelled => {
			Err(BookingError::BookingFinalized.into())
		},
		BookingStatus::Pending | BookingStatus::Confirmed => Ok(()),
	}
}

/// Outcome of driving a booking through a status transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	/// The booking moves to this status
	Apply(BookingStatus),
	/// The booking is already where the transition would put it
	AlreadyDone,
}

/// Cancellation rule
///
/// Allowed from pending and confirmed; cancelling a cancelled booking is a
/// no-op rather than an error.
pub fn cancel_transition(status: BookingStatus) -> Result<Transition, Error> {
	match status {
		BookingStatus::Pending | BookingStatus::Confirmed => {
			Ok(Transition::Apply(BookingStatus::Cancelled))
		},
		BookingStatus::Cancelled => Ok(Transition::AlreadyDone),
	}
}

/// Confirmation rule
///
/// Moves pending to confirmed. Confirming twice is a no-op; a cancelled
/// booking can no longer be confirmed.
pub fn confirm_transition(status: BookingStatus) -> Result<Transition, Error> {
	match status {
		BookingStatus::Pending => {
			Ok(Transition::Apply(BookingStatus::Confirmed))
		},
		BookingStatus::Confirmed => Ok(Transition::AlreadyDone),
		BookingStatus::Cancelled => Err(BookingError::BookingFinalized.into()),
	}
}
