// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::templates::{fishing_template, warung_template, write_template};
use anyhow::Result;
use std::path::Path;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let kind = m.get_one::<String>("kind").unwrap();
    let out = m.get_one::<String>("out").unwrap();
    let rows = match kind.as_str() {
        "fishing" => fishing_template(),
        _ => warung_template(),
    };
    write_template(&rows, Path::new(out))?;
    println!("Wrote {} template to {}", kind, out);
    Ok(())
}
