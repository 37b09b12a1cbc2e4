use chrono::{NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::time_slot;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = time_slot)]
#[diesel(check_for_backend(Pg))]
pub struct TimeSlot {
	pub id:            i32,
	pub restaurant_id: i32,
	pub start_time:    NaiveTime,
	pub end_time:      NaiveTime,
	pub is_available:  bool,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl TimeSlot {
	/// Get all time slots of a restaurant
	#[instrument(skip(conn))]
	pub async fn for_restaurant(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let slots = conn
			.interact(move |conn| {
				use self::time_slot::dsl::*;

				time_slot
					.filter(restaurant_id.eq(r_id))
					.order(start_time.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(slots)
	}

	/// Delete a time slot of a restaurant given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		r_id: i32,
		s_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::time_slot::dsl::*;

				diesel::delete(
					time_slot.find(s_id).filter(restaurant_id.eq(r_id)),
				)
				.execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(diesel::result::Error::NotFound.into());
		}

		info!("deleted time slot with id {s_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = time_slot)]
pub struct NewTimeSlot {
	pub restaurant_id: i32,
	pub start_time:    NaiveTime,
	pub end_time:      NaiveTime,
	pub is_available:  bool,
}

impl NewTimeSlot {
	/// Insert this [`NewTimeSlot`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<TimeSlot, Error> {
		let slot = conn
			.interact(|conn| {
				use self::time_slot::dsl::*;

				diesel::insert_into(time_slot)
					.values(self)
					.returning(TimeSlot::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created time slot {slot:?}");

		Ok(slot)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = time_slot)]
pub struct TimeSlotUpdate {
	pub start_time:   Option<NaiveTime>,
	pub end_time:     Option<NaiveTime>,
	pub is_available: Option<bool>,
}

impl TimeSlotUpdate {
	/// Apply this update to the time slot with the given id
	///
	/// The merged window is re-validated inside the transaction so a
	/// partial update cannot leave the slot ending before it starts.
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		s_id: i32,
		conn: &DbConn,
	) -> Result<TimeSlot, Error> {
		let slot = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let current: TimeSlot = time_slot::table
						.find(s_id)
						.filter(time_slot::restaurant_id.eq(r_id))
						.select(TimeSlot::as_select())
						.get_result(conn)?;

					rules::check_time_window(
						self.start_time.unwrap_or(current.start_time),
						self.end_time.unwrap_or(current.end_time),
					)?;

					let slot = diesel::update(
						time_slot::table
							.find(s_id)
							.filter(time_slot::restaurant_id.eq(r_id)),
					)
					.set((self, time_slot::updated_at.eq(diesel::dsl::now)))
					.returning(TimeSlot::as_returning())
					.get_result(conn)?;

					Ok(slot)
				})
			})
			.await??;

		info!("updated time slot {slot:?}");

		Ok(slot)
	}
}
