//! Caller identities forwarded by the authenticating gateway

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use common::{Error, IdentityError};
use rules::Actor;

/// Header carrying the id of the authenticated profile
pub const PROFILE_ID_HEADER: &str = "x-profile-id";
/// Header carrying the staff flag of the authenticated profile
pub const PROFILE_STAFF_HEADER: &str = "x-profile-staff";

/// The profile behind a request
///
/// ```rs
/// pub async fn foo_route(identity: Identity) -> impl IntoResponse {
///     println!("{:?}", identity.profile_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Identity {
	pub profile_id: i32,
	pub is_staff:   bool,
}

/// The profile behind a request, staff members only
#[derive(Clone, Copy, Debug)]
pub struct StaffIdentity {
	pub profile_id: i32,
}

impl Identity {
	/// The [`Actor`] this identity acts as
	#[must_use]
	pub fn actor(self) -> Actor {
		Actor { profile_id: self.profile_id, is_staff: self.is_staff }
	}
}

impl StaffIdentity {
	/// The [`Actor`] this identity acts as
	#[must_use]
	pub fn actor(self) -> Actor {
		Actor { profile_id: self.profile_id, is_staff: true }
	}
}

fn parse_identity_headers(headers: &HeaderMap) -> Result<Identity, Error> {
	let Some(profile_id) = headers.get(PROFILE_ID_HEADER) else {
		return Err(IdentityError::Missing.into());
	};

	let profile_id = profile_id
		.to_str()
		.ok()
		.and_then(|id| id.parse::<i32>().ok())
		.ok_or(IdentityError::Invalid)?;

	let is_staff = match headers.get(PROFILE_STAFF_HEADER) {
		None => false,
		Some(value) => match value.to_str() {
			Ok("true") => true,
			Ok("false") => false,
			_ => return Err(IdentityError::Invalid.into()),
		},
	};

	Ok(Identity { profile_id, is_staff })
}

impl<S: Send + Sync> FromRequestParts<S> for Identity {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		parse_identity_headers(&parts.headers)
	}
}

impl<S: Send + Sync> FromRequestParts<S> for StaffIdentity {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		let identity = parts.extract::<Identity>().await?;

		if !identity.is_staff {
			return Err(Error::Forbidden);
		}

		Ok(Self { profile_id: identity.profile_id })
	}
}
