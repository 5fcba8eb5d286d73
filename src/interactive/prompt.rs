//
//  turso-cli
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` for the prompts the CLI needs: masked token
//! entry and yes/no confirmation before destructive operations.
//!
//! # Example
//!
//! ```no_run
//! use turso_cli::interactive::prompt::{prompt_confirm_with_default, prompt_password};
//!
//! let token = prompt_password("API token").unwrap();
//! if prompt_confirm_with_default("Delete database my-db?", false).unwrap() {
//!     println!("deleting");
//! }
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Password};

/// Prompts for masked input.
///
/// Characters are not echoed, so the value stays out of terminal scrollback.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Prompts for a yes/no confirmation with a default value.
///
/// The default is shown in the prompt (`[Y/n]` or `[y/N]`) and is accepted by
/// pressing Enter.
pub fn prompt_confirm_with_default(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
