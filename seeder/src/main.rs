mod util;

use std::env;

use chrono::NaiveTime;
use clap::{Error, Parser};
use common::DbConn;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::RunQueryDsl;
use diesel::query_dsl::methods::SelectDsl;
use fake::Fake;
use fake::faker::address::raw::{CityName, StreetName, ZipCode};
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::FreeEmail;
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use models::{NewDiningTable, NewRestaurant, NewTimeSlot};
use rand::seq::IndexedRandom;
use rand::{Rng, rng};

use crate::util::batch_insert;

/// Service windows shared by every seeded restaurant, as
/// (start hour, start minute, end hour, end minute)
const SLOT_WINDOWS: [(u32, u32, u32, u32); 4] =
	[(11, 30, 14, 0), (14, 0, 17, 0), (17, 0, 19, 30), (19, 30, 22, 0)];

#[derive(Parser, Debug)]
struct Opt {
	#[arg(long, short = 'r', default_value_t = 50)]
	restaurants: usize,
	#[arg(long, short = 't', default_value_t = 8)]
	tables:      usize,
	#[arg(long, short = 's', default_value_t = 4)]
	time_slots:  usize,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	if cli.restaurants > 0 {
		println!("Seeding {} restaurants…", cli.restaurants);
		let inserted = seed_restaurants(&conn, cli.restaurants).await?;
		println!("Inserted {inserted} restaurants");
	}

	if cli.tables > 0 {
		println!("Seeding {} tables per restaurant…", cli.tables);
		let inserted = seed_tables(&conn, cli.tables).await?;
		println!("Inserted {inserted} tables");
	}

	if cli.time_slots > 0 {
		println!("Seeding {} time slots per restaurant…", cli.time_slots);
		let inserted = seed_time_slots(&conn, cli.time_slots).await?;
		println!("Inserted {inserted} time slots");
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

/// Load the ids of every restaurant currently in the database
async fn get_restaurant_ids(conn: &DbConn) -> Result<Vec<i32>, Error> {
	conn.interact(|c| {
		use db::restaurant::dsl::*;
		restaurant.select(id).load::<i32>(c)
	})
	.await
	.map_err(|e| Error::raw(clap::error::ErrorKind::Io, e))?
	.map_err(|e| Error::raw(clap::error::ErrorKind::Io, e))
}

/// Seed restaurants with random hours, capacities, and contact details
async fn seed_restaurants(conn: &DbConn, count: usize) -> Result<usize, Error> {
	let mut rng = rng();

	let restaurants: Vec<NewRestaurant> = (0..count)
		.map(|_| {
			let name = CompanyName(EN).fake::<String>();
			let contact_number = PhoneNumber(EN).fake::<String>();
			let email = FreeEmail(EN).fake::<String>();
			let street = StreetName(EN).fake::<String>();
			let number = (1..200).fake_with_rng::<u32, _>(&mut rng);
			let zip = ZipCode(EN).fake::<String>();
			let city = CityName(EN).fake::<String>();
			let address = format!("{street} {number}, {zip} {city}");
			let opening = *[8, 9, 10, 11].choose(&mut rng).unwrap();
			let closing = *[21, 22, 23].choose(&mut rng).unwrap();
			let opening_time = NaiveTime::from_hms_opt(opening, 0, 0).unwrap();
			let closing_time = NaiveTime::from_hms_opt(closing, 0, 0).unwrap();
			let capacity = (20..120).fake_with_rng(&mut rng);
			let utc_offset_minutes = *[0, 60, 120].choose(&mut rng).unwrap();

			NewRestaurant {
				name,
				address,
				contact_number,
				email,
				opening_time,
				closing_time,
				capacity,
				utc_offset_minutes,
			}
		})
		.collect();

	batch_insert(conn, restaurants, 2 << 10, |conn, chunk| {
		use db::restaurant::dsl::*;
		diesel::insert_into(restaurant).values(chunk).execute(conn)
	})
	.await
}

/// Seed numbered dining tables for every restaurant
///
/// Table numbers restart at 1 within each restaurant.
async fn seed_tables(
	conn: &DbConn,
	per_restaurant: usize,
) -> Result<usize, Error> {
	let restaurant_ids = get_restaurant_ids(conn).await?;

	assert!(
		!restaurant_ids.is_empty(),
		"No restaurants exist to assign tables to"
	);

	let mut rng = rng();
	let mut tables = Vec::with_capacity(restaurant_ids.len() * per_restaurant);

	for &restaurant_id in &restaurant_ids {
		for table_number in (1..).take(per_restaurant) {
			let capacity = *[2, 2, 4, 4, 6, 8].choose(&mut rng).unwrap();
			let is_active = rng.random_bool(0.9);

			tables.push(NewDiningTable {
				restaurant_id,
				table_number,
				capacity,
				is_active,
			});
		}
	}

	batch_insert(conn, tables, 2 << 10, |conn, chunk| {
		use db::dining_table::dsl::*;
		diesel::insert_into(dining_table).values(chunk).execute(conn)
	})
	.await
}

/// Seed bookable time slots for every restaurant
async fn seed_time_slots(
	conn: &DbConn,
	per_restaurant: usize,
) -> Result<usize, Error> {
	let restaurant_ids = get_restaurant_ids(conn).await?;

	assert!(
		!restaurant_ids.is_empty(),
		"No restaurants exist to assign time slots to"
	);

	let mut rng = rng();
	let mut slots = Vec::with_capacity(restaurant_ids.len() * per_restaurant);

	for &restaurant_id in &restaurant_ids {
		for &(start_hour, start_minute, end_hour, end_minute) in
			SLOT_WINDOWS.iter().cycle().take(per_restaurant)
		{
			let start_time =
				NaiveTime::from_hms_opt(start_hour, start_minute, 0).unwrap();
			let end_time =
				NaiveTime::from_hms_opt(end_hour, end_minute, 0).unwrap();
			let is_available = rng.random_bool(0.9);

			slots.push(NewTimeSlot {
				restaurant_id,
				start_time,
				end_time,
				is_available,
			});
		}
	}

	batch_insert(conn, slots, 2 << 10, |conn, chunk| {
		use db::time_slot::dsl::*;
		diesel::insert_into(time_slot).values(chunk).execute(conn)
	})
	.await
}
