#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

use anyhow::Result;
use vergen::EmitBuilder;

fn main() -> Result<()> {
    // Falls back to idempotent placeholders when building outside of a git checkout.
    EmitBuilder::builder().all_git().emit()?;

    return Ok(());
}
