//
//  turso-cli
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive terminal prompts.
//!
//! Prompts are only shown when attached to a terminal and `--no-prompt` is not
//! set; see [`can_prompt`].

pub mod prompt;

pub use prompt::*;

use console::Term;

/// Returns `true` if the CLI may ask the user a question.
pub fn can_prompt(no_prompt: bool) -> bool {
    !no_prompt && Term::stdout().is_term() && Term::stderr().is_term()
}
