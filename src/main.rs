//! # dupcount CLI
//!
//! Command-line interface for the duplicate value counter.
//!
//! ## Usage
//! ```bash
//! dupcount count --len 500000 --max 32767
//! dupcount count --input values.txt --strategy sorted --output json
//! dupcount compare --len 20000 --policy all-pairs
//! ```

mod cli;

use duplicate_value_counter::Result;

fn main() -> Result<()> {
    duplicate_value_counter::init_tracing();
    cli::run()
}
