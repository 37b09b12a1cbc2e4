use clap::Error;
use clap::error::ErrorKind;
use common::DbConn;
use diesel::PgConnection;

/// Insert a list of rows in fixed-size chunks using an insert closure
pub async fn batch_insert<T, F>(
	conn: &DbConn,
	rows: Vec<T>,
	chunk_size: usize,
	insert_fn: F,
) -> Result<usize, Error>
where
	T: Send + 'static,
	F: Fn(&mut PgConnection, &[T]) -> Result<usize, diesel::result::Error>
		+ Send
		+ Copy
		+ 'static,
{
	let size = rows.len();
	let mut remaining = rows;
	let mut total = 0;

	while !remaining.is_empty() {
		let rest = remaining.split_off(chunk_size.min(remaining.len()));
		let chunk = remaining;
		remaining = rest;

		let expected = chunk.len();
		let inserted = conn
			.interact(move |c| insert_fn(c, &chunk))
			.await
			.map_err(|e| Error::raw(ErrorKind::Io, e))?
			.map_err(|e| Error::raw(ErrorKind::Io, e))?;

		if inserted != expected {
			return Err(Error::raw(
				ErrorKind::Io,
				format!("Inserted {inserted} rows but expected {expected}"),
			));
		}

		total += inserted;
		println!("Inserted {total}/{size} rows");
	}

	Ok(total)
}
