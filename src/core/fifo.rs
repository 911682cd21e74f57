use winsys::Result;

use std::os::unix::io::RawFd;
use std::path::Path;
use std::path::PathBuf;

use anyhow::anyhow;
use nix::errno::Errno;
use nix::fcntl::open;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;
use nix::unistd::close;
use nix::unistd::mkfifo;
use nix::unistd::read;
use nix::unistd::unlink;
use nix::unistd::write;

/// The named pipe that carries command lines into the window manager,
/// plus the pipe that carries error replies back out.
pub struct ControlChannel {
    path: PathBuf,
    reply_path: PathBuf,
    fd: RawFd,
    pending: Vec<u8>,
}

fn make_fifo(path: &Path) -> Result<()> {
    match mkfifo(path, Mode::from_bits_truncate(0o666)) {
        Ok(()) | Err(nix::Error::Sys(Errno::EEXIST)) => Ok(()),
        Err(err) => Err(anyhow!(
            "unable to create control channel {}: {}",
            path.display(),
            err
        )),
    }
}

impl ControlChannel {
    pub fn open(
        path: &Path,
        reply_path: &Path,
    ) -> Result<Self> {
        make_fifo(path)?;
        make_fifo(reply_path)?;

        // holding the write side too keeps the pipe from reporting end of
        // file once a writer disconnects
        let fd = open(path, OFlag::O_RDWR | OFlag::O_NONBLOCK, Mode::empty()).map_err(|err| {
            anyhow!("unable to open control channel {}: {}", path.display(), err)
        })?;

        info!("listening for commands on {}", path.display());

        Ok(Self {
            path: path.to_owned(),
            reply_path: reply_path.to_owned(),
            fd,
            pending: Vec::new(),
        })
    }

    #[inline]
    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// Drains the pipe and returns every complete line read so far. A
    /// trailing partial line is kept until the rest of it arrives.
    pub fn read_lines(&mut self) -> Vec<String> {
        let mut buffer = [0u8; 4096];

        loop {
            match read(self.fd, &mut buffer) {
                Ok(0) => break,
                Ok(n) => self.pending.extend_from_slice(&buffer[..n]),
                Err(nix::Error::Sys(Errno::EINTR)) => continue,
                Err(nix::Error::Sys(Errno::EAGAIN)) => break,
                Err(err) => {
                    warn!("unable to read from control channel: {}", err);
                    break;
                },
            }
        }

        let end = match self.pending.iter().rposition(|&b| b == b'\n') {
            Some(end) => end,
            None => return Vec::with_capacity(0),
        };

        let rest = self.pending.split_off(end + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        String::from_utf8_lossy(&complete)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Writes a reply for whoever is listening on the reply pipe. Returns
    /// whether anyone received it.
    pub fn reply(
        &self,
        message: &str,
    ) -> bool {
        let fd = match open(
            &self.reply_path,
            OFlag::O_WRONLY | OFlag::O_NONBLOCK,
            Mode::empty(),
        ) {
            Ok(fd) => fd,
            Err(_) => {
                warn!("{}", message);
                return false;
            },
        };

        let line = format!("{}\n", message);
        let delivered = write(fd, line.as_bytes()).map_or(false, |n| n == line.len());
        let _ = close(fd);

        if !delivered {
            warn!("{}", message);
        }

        delivered
    }
}

impl Drop for ControlChannel {
    fn drop(&mut self) {
        let _ = close(self.fd);
        let _ = unlink(&self.path);
        let _ = unlink(&self.reply_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(name: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir();
        let pid = std::process::id();

        (
            dir.join(format!("yaxwm-test-{}-{}.fifo", name, pid)),
            dir.join(format!("yaxwm-test-{}-{}.fifo.reply", name, pid)),
        )
    }

    #[test]
    fn lines_are_split_and_partials_kept() {
        let (path, reply_path) = paths("lines");
        let mut channel = ControlChannel::open(&path, &reply_path).unwrap();

        let writer = open(&path, OFlag::O_WRONLY | OFlag::O_NONBLOCK, Mode::empty()).unwrap();

        write(writer, b"set gap 5\nwin kill\nws").unwrap();
        assert_eq!(channel.read_lines(), vec!["set gap 5", "win kill"]);

        write(writer, b" 2\n").unwrap();
        assert_eq!(channel.read_lines(), vec!["ws 2"]);
        assert!(channel.read_lines().is_empty());

        close(writer).unwrap();
        drop(channel);

        assert!(!path.exists());
        assert!(!reply_path.exists());
    }

    #[test]
    fn reply_without_listener_is_not_delivered() {
        let (path, reply_path) = paths("reply");
        let channel = ControlChannel::open(&path, &reply_path).unwrap();

        assert!(!channel.reply("!invalid or unknown command: frob"));
    }
}
