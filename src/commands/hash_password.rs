//! Hash-password command - Produces the value for `OPERATOR_PASSWORD_HASH`.

use crate::cli::args::HashPasswordArgs;
use crate::domain::Password;
use crate::errors::AppResult;

/// Execute the hash-password command
pub fn execute(args: HashPasswordArgs) -> AppResult<()> {
    let password = Password::new(&args.plain)?;
    println!("{}", password.as_str());
    Ok(())
}
