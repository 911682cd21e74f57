use crate::change::Change;

use std::cmp::Ord;
use std::hash::BuildHasher;
use std::hash::Hasher;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Sub;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;

#[derive(Default)]
pub struct IdHasher {
    state: u64,
}

impl Hasher for IdHasher {
    #[inline]
    fn write(
        &mut self,
        bytes: &[u8],
    ) {
        for &byte in bytes {
            self.state = self.state.rotate_left(8) + u64::from(byte);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

#[derive(Default, Clone)]
pub struct BuildIdHasher;

impl BuildHasher for BuildIdHasher {
    type Hasher = IdHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        Self::Hasher {
            state: 0,
        }
    }
}

pub struct Util;

impl Util {
    #[inline]
    pub fn change_within_range<T>(
        min: T,
        max: T,
        base: T,
        change: Change<T>,
    ) -> T
    where
        T: Ord + Add<Output = T> + Mul<Output = T> + Sub<Output = T> + Copy,
    {
        // compare against the distance to the bound so the sum never overflows
        match change {
            Change::Inc(delta) => {
                if base >= max || delta >= max - base {
                    max
                } else {
                    base + delta
                }
            },
            Change::Dec(delta) => {
                if base <= min || delta >= base - min {
                    min
                } else {
                    base - delta
                }
            },
        }
    }

    /// Runs the startup script detached, in a session of its own.
    pub fn spawn_script(path: &Path) {
        let mut command = Command::new(path);

        command
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()
                    .map(|_| ())
                    .map_err(|_| std::io::Error::last_os_error())
            });
        }

        match command.spawn() {
            Ok(child) => info!("executing {} as pid {}", path.display(), child.id()),
            Err(err) => warn!("unable to execute {}: {}", path.display(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_saturates_at_bounds() {
        assert_eq!(Util::change_within_range(0, 10, 4, Change::Inc(3)), 7);
        assert_eq!(Util::change_within_range(0, 10, 8, Change::Inc(3)), 10);
        assert_eq!(Util::change_within_range(0, 10, 2, Change::Dec(3)), 0);
        assert_eq!(Util::change_within_range(0, 132, 5, Change::Inc(i32::MAX)), 132);
        assert_eq!(Util::change_within_range(0, 132, 5, Change::Dec(i32::MAX)), 0);
        assert_eq!(Util::change_within_range(-10, 10, -5, Change::Dec(i32::MAX)), -10);
    }
}
