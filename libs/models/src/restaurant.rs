use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use common::{DbConn, Error};
use db::restaurant;
use diesel::pg::Pg;
use diesel::prelude::*;
use rules::RestaurantHours;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = restaurant)]
#[diesel(check_for_backend(Pg))]
pub struct Restaurant {
	pub id:                 i32,
	pub name:               String,
	pub address:            String,
	pub contact_number:     String,
	pub email:              String,
	pub opening_time:       NaiveTime,
	pub closing_time:       NaiveTime,
	pub capacity:           i32,
	pub utc_offset_minutes: i32,
	pub created_at:         NaiveDateTime,
	pub updated_at:         NaiveDateTime,
}

impl Restaurant {
	/// The opening hours the availability check consults
	#[must_use]
	pub fn hours(&self) -> RestaurantHours {
		RestaurantHours {
			opening_time: self.opening_time,
			closing_time: self.closing_time,
		}
	}

	/// The current date in the restaurants own timezone
	#[must_use]
	pub fn today(&self) -> NaiveDate {
		let now = Utc::now()
			+ TimeDelta::minutes(i64::from(self.utc_offset_minutes));

		now.date_naive()
	}

	/// Get all restaurants
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let restaurants = conn
			.interact(|conn| {
				use self::restaurant::dsl::*;

				restaurant
					.order(name.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(restaurants)
	}

	/// Get a [`Restaurant`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let restaurant = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				restaurant
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(restaurant)
	}

	/// Delete a [`Restaurant`] given its id
	///
	/// Tables, time slots, and bookings of the restaurant go with it.
	#[instrument(skip(conn))]
	pub async fn delete_by_id(r_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::restaurant::dsl::*;

				diesel::delete(restaurant.find(r_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(diesel::result::Error::NotFound.into());
		}

		info!("deleted restaurant with id {r_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = restaurant)]
pub struct NewRestaurant {
	pub name:               String,
	pub address:            String,
	pub contact_number:     String,
	pub email:              String,
	pub opening_time:       NaiveTime,
	pub closing_time:       NaiveTime,
	pub capacity:           i32,
	pub utc_offset_minutes: i32,
}

impl NewRestaurant {
	/// Insert this [`NewRestaurant`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Restaurant, Error> {
		let restaurant = conn
			.interact(|conn| {
				use self::restaurant::dsl::*;

				diesel::insert_into(restaurant)
					.values(self)
					.returning(Restaurant::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created restaurant {restaurant:?}");

		Ok(restaurant)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = restaurant)]
pub struct RestaurantUpdate {
	pub name:               Option<String>,
	pub address:            Option<String>,
	pub contact_number:     Option<String>,
	pub email:              Option<String>,
	pub opening_time:       Option<NaiveTime>,
	pub closing_time:       Option<NaiveTime>,
	pub capacity:           Option<i32>,
	pub utc_offset_minutes: Option<i32>,
}

impl RestaurantUpdate {
	/// Apply this update to the [`Restaurant`] with the given id
	///
	/// The merged opening hours are re-validated inside the transaction so
	/// a partial update cannot leave the restaurant closing before it
	/// opens.
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<Restaurant, Error> {
		let restaurant = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let current: Restaurant = restaurant::table
						.find(r_id)
						.select(Restaurant::as_select())
						.get_result(conn)?;

					rules::check_operating_hours(
						self.opening_time.unwrap_or(current.opening_time),
						self.closing_time.unwrap_or(current.closing_time),
					)?;

					let restaurant = diesel::update(
						restaurant::table.find(r_id),
					)
					.set((
						self,
						restaurant::updated_at.eq(diesel::dsl::now),
					))
					.returning(Restaurant::as_returning())
					.get_result(conn)?;

					Ok(restaurant)
				})
			})
			.await??;

		info!("updated restaurant {restaurant:?}");

		Ok(restaurant)
	}
}
