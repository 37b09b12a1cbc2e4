use chrono::{NaiveDate, NaiveDateTime};
use common::{DbConn, Error};
use db::{BookingStatus, booking, dining_table, restaurant};
use diesel::dsl::max;
use diesel::pg::Pg;
use diesel::prelude::*;
use rules::{TableState, check_capacity_shrink};
use serde::{Deserialize, Serialize};

use crate::Restaurant;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = dining_table)]
#[diesel(check_for_backend(Pg))]
pub struct DiningTable {
	pub id:            i32,
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub capacity:      i32,
	pub is_active:     bool,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl DiningTable {
	/// The fields the availability check consults
	#[must_use]
	pub fn state(&self) -> TableState {
		TableState { capacity: self.capacity, is_active: self.is_active }
	}

	/// Get all tables of a restaurant
	#[instrument(skip(conn))]
	pub async fn for_restaurant(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let tables = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				dining_table
					.filter(restaurant_id.eq(r_id))
					.order(table_number.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(tables)
	}

	/// Delete a table of a restaurant given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		r_id: i32,
		t_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::dining_table::dsl::*;

				diesel::delete(
					dining_table.find(t_id).filter(restaurant_id.eq(r_id)),
				)
				.execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(diesel::result::Error::NotFound.into());
		}

		info!("deleted dining table with id {t_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = dining_table)]
pub struct NewDiningTable {
	pub restaurant_id: i32,
	pub table_number:  i32,
	pub capacity:      i32,
	pub is_active:     bool,
}

impl NewDiningTable {
	/// Insert this [`NewDiningTable`]
	///
	/// Reusing a table number within the restaurant surfaces as a
	/// duplicate.
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<DiningTable, Error> {
		let table = conn
			.interact(|conn| {
				use self::dining_table::dsl::*;

				diesel::insert_into(dining_table)
					.values(self)
					.returning(DiningTable::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created dining table {table:?}");

		Ok(table)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = dining_table)]
pub struct DiningTableUpdate {
	pub table_number: Option<i32>,
	pub capacity:     Option<i32>,
	pub is_active:    Option<bool>,
}

impl DiningTableUpdate {
	/// Apply this update to the table with the given id
	///
	/// Shrinking the capacity below the party size of a live upcoming
	/// booking on this table is rejected, so committed bookings always fit
	/// their table.
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		t_id: i32,
		conn: &DbConn,
	) -> Result<DiningTable, Error> {
		let table = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					// Row-lock the table first, so a concurrent booking
					// insert and this capacity change serialize
					let current: DiningTable = dining_table::table
						.find(t_id)
						.filter(dining_table::restaurant_id.eq(r_id))
						.select(DiningTable::as_select())
						.for_update()
						.get_result(conn)?;

					if let Some(capacity) = self.capacity {
						let restaurant: Restaurant = restaurant::table
							.find(r_id)
							.select(Restaurant::as_select())
							.get_result(conn)?;

						check_booked_parties_fit(
							current.id,
							capacity,
							restaurant.today(),
							conn,
						)?;
					}

					let table = diesel::update(
						dining_table::table
							.find(t_id)
							.filter(dining_table::restaurant_id.eq(r_id)),
					)
					.set((
						self,
						dining_table::updated_at.eq(diesel::dsl::now),
					))
					.returning(DiningTable::as_returning())
					.get_result(conn)?;

					Ok(table)
				})
			})
			.await??;

		info!("updated dining table {table:?}");

		Ok(table)
	}
}

/// Check that every live upcoming booking on the table still fits the new
/// capacity
///
/// Must run after the table row is locked, or a concurrent insert could
/// slip a larger party past the check.
fn check_booked_parties_fit(
	t_id: i32,
	capacity: i32,
	today: NaiveDate,
	conn: &mut PgConnection,
) -> Result<(), Error> {
	let largest_party: Option<i32> = booking::table
		.filter(booking::table_id.eq(t_id))
		.filter(booking::status.ne(BookingStatus::Cancelled))
		.filter(booking::date.ge(today))
		.select(max(booking::number_of_guests))
		.get_result(conn)?;

	check_capacity_shrink(largest_party, capacity)
}
