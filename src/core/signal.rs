use winsys::Result;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use nix::sys::signal::sigaction;
use nix::sys::signal::SaFlags;
use nix::sys::signal::SigAction;
use nix::sys::signal::SigHandler;
use nix::sys::signal::SigSet;
use nix::sys::signal::Signal;
use nix::sys::wait::waitpid;
use nix::sys::wait::WaitPidFlag;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;

static RUNNING: AtomicBool = AtomicBool::new(true);

#[inline]
pub fn running() -> bool {
    RUNNING.load(Ordering::SeqCst)
}

#[inline]
pub fn request_exit() {
    RUNNING.store(false, Ordering::SeqCst);
}

extern "C" fn on_terminate(_: nix::libc::c_int) {
    request_exit();
}

extern "C" fn on_child(_: nix::libc::c_int) {
    reap_children();
}

/// Collects every exited child without blocking.
pub fn reap_children() {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) | Err(_) => break,
            Ok(_) => {},
        }
    }
}

pub fn install_handlers() -> Result<()> {
    let terminate = SigAction::new(
        SigHandler::Handler(on_terminate),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );

    let child = SigAction::new(
        SigHandler::Handler(on_child),
        SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
        SigSet::empty(),
    );

    unsafe {
        for &signal in &[Signal::SIGTERM, Signal::SIGINT, Signal::SIGHUP] {
            sigaction(signal, &terminate)?;
        }

        sigaction(Signal::SIGCHLD, &child)?;
    }

    reap_children();
    Ok(())
}
