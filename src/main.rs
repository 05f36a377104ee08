mod app;
mod audio;
mod config;
mod countdown;
mod error;
mod grain;
mod loader;
mod logging;
mod manifest;
mod page;
mod runtime;
mod timer;
mod ui;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
