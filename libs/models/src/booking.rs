use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::{BookingStatus, booking, dining_table, restaurant, time_slot};
use diesel::dsl::sum;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use rules::{
	Actor,
	BookingCandidate,
	BookingPolicy,
	Transition,
	cancel_transition,
	check_booking,
	check_booking_access,
	check_editable,
	check_staff_access,
	check_table_occupancy,
	confirm_transition,
};
use serde::{Deserialize, Serialize};

use crate::{DiningTable, Restaurant, TimeSlot};

/// Filters for the staff listing of a restaurants bookings
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub date:   Option<NaiveDate>,
	pub status: Option<BookingStatus>,
}

type BoxedCondition<S, T> = Box<dyn BoxableExpression<S, Pg, SqlType = T>>;

/// A booking joined with the context it was made against
#[derive(Clone, Debug, Serialize)]
pub struct BookingDetail {
	pub booking:    Booking,
	pub restaurant: Restaurant,
	pub table:      Option<DiningTable>,
	pub time_slot:  Option<TimeSlot>,
}

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct Booking {
	pub id:               i32,
	pub profile_id:       i32,
	pub restaurant_id:    i32,
	pub table_id:         Option<i32>,
	pub time_slot_id:     Option<i32>,
	pub date:             NaiveDate,
	pub time:             NaiveTime,
	pub number_of_guests: i32,
	pub special_requests: Option<String>,
	pub status:           BookingStatus,
	pub confirmed_at:     Option<NaiveDateTime>,
	pub confirmed_by:     Option<i32>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl Booking {
	/// The persisted fields a re-check starts from
	#[must_use]
	pub fn candidate(&self) -> BookingCandidate {
		BookingCandidate {
			date:             self.date,
			time:             self.time,
			number_of_guests: self.number_of_guests,
		}
	}

	/// Get all bookings made by a profile, newest dining date first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<BookingDetail>, Error> {
		let bookings = conn
			.interact(move |conn| {
				booking::table
					.inner_join(restaurant::table)
					.left_outer_join(dining_table::table)
					.left_outer_join(time_slot::table)
					.filter(booking::profile_id.eq(p_id))
					.order((booking::date.desc(), booking::time.desc()))
					.select((
						Self::as_select(),
						Restaurant::as_select(),
						Option::<DiningTable>::as_select(),
						Option::<TimeSlot>::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(|(booking, restaurant, table, time_slot)| {
				BookingDetail { booking, restaurant, table, time_slot }
			})
			.collect();

		Ok(bookings)
	}

	/// Get all bookings of a restaurant, newest dining date first
	#[instrument(skip(conn))]
	pub async fn for_restaurant(
		r_id: i32,
		filter: BookingFilter,
		conn: &DbConn,
	) -> Result<Vec<BookingDetail>, Error> {
		let bookings = conn
			.interact(move |conn| {
				let date_filter: BoxedCondition<_, Bool> =
					if let Some(date) = filter.date {
						Box::new(booking::date.eq(date))
					} else {
						Box::new(true.into_sql::<Bool>().eq(true))
					};

				let status_filter: BoxedCondition<_, Bool> =
					if let Some(status) = filter.status {
						Box::new(booking::status.eq(status))
					} else {
						Box::new(true.into_sql::<Bool>().eq(true))
					};

				booking::table
					.inner_join(restaurant::table)
					.left_outer_join(dining_table::table)
					.left_outer_join(time_slot::table)
					.filter(booking::restaurant_id.eq(r_id))
					.filter(date_filter)
					.filter(status_filter)
					.order((booking::date.desc(), booking::time.desc()))
					.select((
						Self::as_select(),
						Restaurant::as_select(),
						Option::<DiningTable>::as_select(),
						Option::<TimeSlot>::as_select(),
					))
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(|(booking, restaurant, table, time_slot)| {
				BookingDetail { booking, restaurant, table, time_slot }
			})
			.collect();

		Ok(bookings)
	}

	/// Get one booking with its context if the actor may see it
	///
	/// A missing booking and a booking the actor may not see are reported
	/// as two different errors.
	#[instrument(skip(conn))]
	pub async fn get_for_actor(
		b_id: i32,
		actor: Actor,
		conn: &DbConn,
	) -> Result<BookingDetail, Error> {
		let (booking, restaurant, table, time_slot): (
			Self,
			Restaurant,
			Option<DiningTable>,
			Option<TimeSlot>,
		) = conn
			.interact(move |conn| {
				booking::table
					.inner_join(restaurant::table)
					.left_outer_join(dining_table::table)
					.left_outer_join(time_slot::table)
					.filter(booking::id.eq(b_id))
					.select((
						Self::as_select(),
						Restaurant::as_select(),
						Option::<DiningTable>::as_select(),
						Option::<TimeSlot>::as_select(),
					))
					.get_result(conn)
			})
			.await??;

		check_booking_access(actor, booking.profile_id)?;

		Ok(BookingDetail { booking, restaurant, table, time_slot })
	}

	/// Cancel the booking with the given id
	///
	/// Idempotent, cancelling a cancelled booking returns it unchanged.
	#[instrument(skip(conn))]
	pub async fn cancel(
		b_id: i32,
		actor: Actor,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let booking = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let booking: Self = booking::table
						.find(b_id)
						.select(Self::as_select())
						.for_update()
						.get_result(conn)?;

					check_booking_access(actor, booking.profile_id)?;

					match cancel_transition(booking.status)? {
						Transition::AlreadyDone => Ok(booking),
						Transition::Apply(status) => {
							let booking =
								diesel::update(booking::table.find(b_id))
									.set((
										booking::status.eq(status),
										booking::updated_at
											.eq(diesel::dsl::now),
									))
									.returning(Self::as_returning())
									.get_result(conn)?;

							Ok(booking)
						},
					}
				})
			})
			.await??;

		info!("cancelled booking with id {b_id}");

		Ok(booking)
	}

	/// Confirm the booking with the given id
	///
	/// Staff only. Confirming a confirmed booking is a no-op.
	#[instrument(skip(conn))]
	pub async fn confirm(
		b_id: i32,
		actor: Actor,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let booking = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					check_staff_access(actor)?;

					let booking: Self = booking::table
						.find(b_id)
						.select(Self::as_select())
						.for_update()
						.get_result(conn)?;

					match confirm_transition(booking.status)? {
						Transition::AlreadyDone => Ok(booking),
						Transition::Apply(status) => {
							let booking =
								diesel::update(booking::table.find(b_id))
									.set((
										booking::status.eq(status),
										booking::confirmed_at
											.eq(diesel::dsl::now),
										booking::confirmed_by
											.eq(actor.profile_id),
										booking::updated_at
											.eq(diesel::dsl::now),
									))
									.returning(Self::as_returning())
									.get_result(conn)?;

							Ok(booking)
						},
					}
				})
			})
			.await??;

		info!("confirmed booking with id {b_id}");

		Ok(booking)
	}

	/// Delete the booking with the given id
	///
	/// Owners and staff may delete a booking in any state.
	#[instrument(skip(conn))]
	pub async fn delete(
		b_id: i32,
		actor: Actor,
		conn: &DbConn,
	) -> Result<(), Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let booking: Self = booking::table
					.find(b_id)
					.select(Self::as_select())
					.get_result(conn)?;

				check_booking_access(actor, booking.profile_id)?;

				diesel::delete(booking::table.find(b_id)).execute(conn)?;

				Ok(())
			})
		})
		.await??;

		info!("deleted booking with id {b_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = booking)]
pub struct NewBooking {
	pub profile_id:       i32,
	pub restaurant_id:    i32,
	pub table_id:         Option<i32>,
	pub time_slot_id:     Option<i32>,
	pub date:             NaiveDate,
	pub time:             NaiveTime,
	pub number_of_guests: i32,
	pub special_requests: Option<String>,
}

impl NewBooking {
	/// Insert this [`NewBooking`] if every booking rule accepts it
	///
	/// The rules run inside the insert transaction against a row-locked
	/// table, so two concurrent requests cannot both pass the occupancy
	/// check and overfill it.
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		policy: BookingPolicy,
		conn: &DbConn,
	) -> Result<Booking, Error> {
		let booking = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let restaurant: Restaurant = restaurant::table
						.find(self.restaurant_id)
						.select(Restaurant::as_select())
						.get_result(conn)?;

					let table =
						lock_table(self.restaurant_id, self.table_id, conn)?;
					check_slot(self.restaurant_id, self.time_slot_id, conn)?;

					let candidate = BookingCandidate {
						date:             self.date,
						time:             self.time,
						number_of_guests: self.number_of_guests,
					};

					check_booking(
						restaurant.hours(),
						table.as_ref().map(DiningTable::state),
						candidate,
						restaurant.today(),
						policy,
					)?;

					if let Some(table) = &table {
						let seated = seated_guests(
							table.id,
							candidate.date,
							candidate.time,
							None,
							conn,
						)?;

						check_table_occupancy(
							table.capacity,
							seated,
							candidate.number_of_guests,
						)?;
					}

					let booking = diesel::insert_into(booking::table)
						.values(self)
						.returning(Booking::as_returning())
						.get_result(conn)?;

					Ok(booking)
				})
			})
			.await??;

		info!("created booking {booking:?}");

		Ok(booking)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = booking)]
pub struct BookingUpdate {
	pub table_id:         Option<i32>,
	pub time_slot_id:     Option<i32>,
	pub date:             Option<NaiveDate>,
	pub time:             Option<NaiveTime>,
	pub number_of_guests: Option<i32>,
	pub special_requests: Option<String>,
}

impl BookingUpdate {
	/// Apply this update to the booking with the given id
	///
	/// Absent fields keep their stored value and the merged result passes
	/// through the same checks as a new booking, inside the write
	/// transaction. Updating a confirmed booking keeps it confirmed.
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		b_id: i32,
		actor: Actor,
		policy: BookingPolicy,
		conn: &DbConn,
	) -> Result<Booking, Error> {
		let booking = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let booking: Booking = booking::table
						.find(b_id)
						.select(Booking::as_select())
						.for_update()
						.get_result(conn)?;

					check_booking_access(actor, booking.profile_id)?;
					check_editable(booking.status)?;

					let restaurant: Restaurant = restaurant::table
						.find(booking.restaurant_id)
						.select(Restaurant::as_select())
						.get_result(conn)?;

					// The update may move the booking to another table
					let table = lock_table(
						booking.restaurant_id,
						self.table_id.or(booking.table_id),
						conn,
					)?;
					check_slot(
						booking.restaurant_id,
						self.time_slot_id.or(booking.time_slot_id),
						conn,
					)?;

					let candidate = booking.candidate().overlay(
						self.date,
						self.time,
						self.number_of_guests,
					);

					check_booking(
						restaurant.hours(),
						table.as_ref().map(DiningTable::state),
						candidate,
						restaurant.today(),
						policy,
					)?;

					if let Some(table) = &table {
						let seated = seated_guests(
							table.id,
							candidate.date,
							candidate.time,
							Some(b_id),
							conn,
						)?;

						check_table_occupancy(
							table.capacity,
							seated,
							candidate.number_of_guests,
						)?;
					}

					let booking = diesel::update(booking::table.find(b_id))
						.set((
							self,
							booking::updated_at.eq(diesel::dsl::now),
						))
						.returning(Booking::as_returning())
						.get_result(conn)?;

					Ok(booking)
				})
			})
			.await??;

		info!("updated booking {booking:?}");

		Ok(booking)
	}
}

/// Load and row-lock the target table inside the current transaction
///
/// A table id belonging to a different restaurant is treated as missing.
fn lock_table(
	r_id: i32,
	table_id: Option<i32>,
	conn: &mut PgConnection,
) -> Result<Option<DiningTable>, Error> {
	let Some(t_id) = table_id else {
		return Ok(None);
	};

	let table = dining_table::table
		.find(t_id)
		.filter(dining_table::restaurant_id.eq(r_id))
		.select(DiningTable::as_select())
		.for_update()
		.get_result(conn)?;

	Ok(Some(table))
}

/// Check that the requested time slot belongs to the restaurant
///
/// The slot itself is advisory, only its ownership is verified.
fn check_slot(
	r_id: i32,
	slot_id: Option<i32>,
	conn: &mut PgConnection,
) -> Result<(), Error> {
	let Some(s_id) = slot_id else {
		return Ok(());
	};

	time_slot::table
		.find(s_id)
		.filter(time_slot::restaurant_id.eq(r_id))
		.select(TimeSlot::as_select())
		.get_result::<TimeSlot>(conn)?;

	Ok(())
}

/// Sum the party sizes of every live booking holding the same table, date,
/// and time
fn seated_guests(
	t_id: i32,
	on_date: NaiveDate,
	at_time: NaiveTime,
	exclude: Option<i32>,
	conn: &mut PgConnection,
) -> Result<i64, Error> {
	let exclude_filter: BoxedCondition<_, Bool> =
		if let Some(b_id) = exclude {
			Box::new(booking::id.ne(b_id))
		} else {
			Box::new(true.into_sql::<Bool>().eq(true))
		};

	let seated: Option<i64> = booking::table
		.filter(booking::table_id.eq(t_id))
		.filter(booking::date.eq(on_date))
		.filter(booking::time.eq(at_time))
		.filter(booking::status.ne(BookingStatus::Cancelled))
		.filter(exclude_filter)
		.select(sum(booking::number_of_guests))
		.get_result(conn)?;

	Ok(seated.unwrap_or(0))
}
