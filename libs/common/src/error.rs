//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Invalid or missing request identity
	#[error(transparent)]
	IdentityError(#[from] IdentityError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
	/// Any rejection of a booking request
	#[error(transparent)]
	BookingError(#[from] BookingError),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::InternalServerError => 3,
			Self::NotFound(_) => 4,
			Self::IdentityError(e) => {
				match e {
					IdentityError::Missing => 5,
					IdentityError::Invalid => 6,
				}
			},
			Self::ValidationError(_) => 7,
			Self::BookingError(e) => {
				match e {
					BookingError::OutOfHours { .. } => 8,
					BookingError::PastDate(_) => 9,
					BookingError::CapacityExceeded(_) => 10,
					BookingError::GuestCountOutOfRange { .. } => 11,
					BookingError::InactiveTable => 12,
					BookingError::BookingFinalized => 13,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::OutOfHours { open, close } => {
						Some(
							serde_json::json!({"open": open, "close": close})
								.to_string(),
						)
					},
					BookingError::PastDate(today) => {
						Some(serde_json::json!({"today": today}).to_string())
					},
					BookingError::CapacityExceeded(capacity) => {
						Some(
							serde_json::json!({"capacity": capacity})
								.to_string(),
						)
					},
					BookingError::GuestCountOutOfRange { min, max } => {
						Some(
							serde_json::json!({"min": min, "max": max})
								.to_string(),
						)
					},
					BookingError::InactiveTable
					| BookingError::BookingFinalized => None,
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_)
			| Self::BookingError(BookingError::BookingFinalized) => {
				StatusCode::CONFLICT
			},
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::IdentityError(_) => StatusCode::UNAUTHORIZED,
			Self::ValidationError(_) | Self::BookingError(_) => {
				StatusCode::UNPROCESSABLE_ENTITY
			},
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to the identity forwarded by the gateway
#[derive(Debug, Error)]
pub enum IdentityError {
	#[error("missing profile identity headers")]
	Missing,
	#[error("invalid profile identity headers")]
	Invalid,
}

/// Every reason a booking request can be turned down
#[derive(Debug, Error)]
pub enum BookingError {
	/// The requested time falls outside the restaurants opening hours
	#[error("booking time is outside the restaurants opening hours")]
	OutOfHours { open: NaiveTime, close: NaiveTime },
	/// The requested date lies before the restaurants current date
	#[error("booking date is in the past")]
	PastDate(NaiveDate),
	/// The party would not fit the requested table
	#[error("party size exceeds the capacity of this table")]
	CapacityExceeded(i32),
	/// The party size falls outside the accepted range
	#[error("party size is outside the accepted range")]
	GuestCountOutOfRange { min: i32, max: i32 },
	/// The requested table is not in service
	#[error("this table is not in service")]
	InactiveTable,
	/// The booking has reached a terminal state and can no longer change
	#[error("booking has been cancelled and can no longer change")]
	BookingFinalized,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([(
			"dining_table_restaurant_id_table_number_key",
			"table_number",
		)])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				// Unwrap is safe as constraint_name is guaranteed to exist
				// for postgres
				let constraint_name = info.constraint_name().unwrap();

				match CONSTRAINT_TO_COLUMN.get(constraint_name) {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => {
						InternalServerError::ConstraintError(
							constraint_name.to_string(),
						)
						.into()
					},
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
