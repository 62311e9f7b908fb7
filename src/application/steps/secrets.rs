//! Credentials on the target host: the application secret key and the
//! Postgres database owner

use crate::application::runner::StepContext;
use crate::application::session::Session;
use crate::domain::value_objects::{SecretKey, ShellCommand};
use crate::error::StagehandResult;

/// Where the application reads its secret key from
pub const SECRET_KEY_PATH: &str = "/etc/secret_key.txt";

const POSTGRES_USER: &str = "postgres";

pub(super) fn create_key(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    remove_key(session, context)?;
    let key = SecretKey::generate();
    session.put_secret(SECRET_KEY_PATH, &format!("{}\n", key.expose()))?;
    Ok(())
}

pub(super) fn remove_key(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    session.run_privileged(&ShellCommand::new("rm").literal("-rf").arg(SECRET_KEY_PATH), None)?;
    Ok(())
}

/// Not idempotent: a second run fails because the database already exists.
pub(super) fn create_database(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let db = &context.database.database;
    let name = sql_identifier(&db.name);
    let user = sql_identifier(&db.user);

    let statements = [
        format!("CREATE DATABASE {};", name),
        format!("CREATE USER {} WITH PASSWORD {};", user, sql_literal(&db.password)),
        format!("ALTER ROLE {} SET client_encoding TO 'utf8';", user),
        format!(
            "ALTER ROLE {} SET default_transaction_isolation TO 'read committed';",
            user
        ),
        format!("ALTER ROLE {} SET timezone TO 'UTC';", user),
        format!("GRANT ALL PRIVILEGES ON DATABASE {} TO {};", name, user),
    ];

    for statement in statements {
        session.run_privileged(
            &ShellCommand::new("psql").literal("-c").arg(statement),
            Some(POSTGRES_USER),
        )?;
    }
    Ok(())
}

/// Quote a SQL identifier unless Postgres would read it unchanged
fn sql_identifier(name: &str) -> String {
    let mut chars = name.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
