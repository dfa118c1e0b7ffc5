/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use clap::Parser;
use device_inventory::{
    render, Inventory, InventoryConfig, InventoryPublisher, InventoryService, OutputFormat,
    RenderOptions, ServiceContainer,
};
use log::LevelFilter;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "device_inventory", about = "Collect a device inventory as XML or JSON")]
struct Cli {
    /// Output format (json or xml)
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Write the inventory to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep private values in JSON output
    #[arg(long)]
    include_private: bool,

    /// Indent the output
    #[arg(long)]
    pretty: bool,

    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn print_summary(inventory: &Inventory) {
    eprintln!("Device: {}", inventory.device_id);
    for section in &inventory.sections {
        eprintln!("  {:<20} {} record(s)", section.collector, section.categories.len());
    }
    if !inventory.diagnostics.is_empty() {
        eprintln!("Diagnostics:");
        for diagnostic in &inventory.diagnostics {
            eprintln!("  {diagnostic}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match &cli.config {
        Some(path) => InventoryConfig::load(path)?,
        None => InventoryConfig::default(),
    };

    let container = ServiceContainer::with_inventory_config(config);
    let inventory = container.create_inventory_service().collect_inventory();
    print_summary(&inventory);

    let options = RenderOptions {
        format: cli.format,
        include_private: cli.include_private,
        pretty: cli.pretty,
    };

    match &cli.output {
        Some(path) => {
            container
                .create_publisher()
                .publish(&inventory, &options, path)
                .await?;
            eprintln!("Inventory has been written to {}", path.display());
        }
        None => println!("{}", render(&inventory, &options)?),
    }

    Ok(())
}
