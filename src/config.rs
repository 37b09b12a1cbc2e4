use common::DbPool;
use deadpool_diesel::postgres::Manager;
use rules::BookingPolicy;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	pub booking_policy: BookingPolicy,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: i32) -> i32 {
		match std::env::var(var) {
			Ok(value) => value
				.parse()
				.unwrap_or_else(|_| panic!("{var} must be a number")),
			Err(_) => default,
		}
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let booking_policy = BookingPolicy {
			min_guests: Self::get_env_var_or("BOOKING_MIN_GUESTS", 1),
			max_guests: Self::get_env_var_or("BOOKING_MAX_GUESTS", 8),
		};

		Self { database_url, booking_policy }
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		DbPool::builder(manager).build().unwrap()
	}
}
