#![deny(clippy::all)]

#[macro_use]
extern crate log;

#[allow(unused_imports)]
use simplelog::LevelFilter;
#[allow(unused_imports)]
use simplelog::SimpleLogger;

use winsys::xdata::xconnection::XConnection;
pub use winsys::Result;

#[macro_use]
mod defaults;

mod change;
mod client;
mod command;
mod compare;
mod config;
mod error;
mod fifo;
mod layout;
mod model;
mod monitor;
mod reconcile;
mod rule;
mod signal;
mod store;
mod util;
mod workspace;

#[cfg(test)]
mod mock;

use config::Config;
use fifo::ControlChannel;
use model::Model;

use std::env;
use std::os::unix::io::AsRawFd;
use std::os::unix::process::CommandExt;
use std::process;

pub fn main() -> Result<()> {
    let mut args = env::args();
    let argv0 = args.next().unwrap_or_else(|| WM_NAME!().to_owned());

    match args.next().as_deref() {
        None => {},
        Some("-v") => {
            eprintln!("{} {}", WM_NAME!(), env!("CARGO_PKG_VERSION"));
            process::exit(1);
        },
        Some(_) => {
            eprintln!("usage: {} [-v]", WM_NAME!());
            process::exit(1);
        },
    }

    #[cfg(debug_assertions)]
    SimpleLogger::init(LevelFilter::Debug, simplelog::Config::default())?;
    #[cfg(not(debug_assertions))]
    SimpleLogger::init(LevelFilter::Info, simplelog::Config::default())?;

    let (conn, screen_num) = x11rb::rust_connection::RustConnection::connect(None)?;
    let display_fd = conn.stream().as_raw_fd();
    let xconn = XConnection::new(&conn, screen_num)?;

    signal::install_handlers()?;

    let config = Config::from_env();
    let mut channel = ControlChannel::open(&config.fifo, &config.reply_fifo)?;

    let mut model = Model::new(&xconn, config.script);
    model.run(&mut channel, display_fd);
    model.exit();

    let restart = model.restart_requested();

    drop(model);
    drop(channel);
    drop(xconn);
    drop(conn);

    if restart {
        info!("restarting {}", argv0);
        let err = process::Command::new(&argv0).exec();
        error!("unable to restart {}: {}", argv0, err);
        return Err(err.into());
    }

    Ok(())
}
