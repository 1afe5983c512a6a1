use anyhow::{Context, Result};
use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, MasterPty, PtySize, PtySystem};
use std::cell::Cell;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use super::backend::{TerminalBackend, TerminalSession};
use crate::app::Action;
use crate::models::TerminalId;

/// Shell used when `$SHELL` is not set.
const FALLBACK_SHELL: &str = "/bin/bash";

fn user_shell() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| FALLBACK_SHELL.to_string())
}

pub struct PtyHandle {
    pub master: Box<dyn MasterPty + Send>,
    pub child_killer: Box<dyn ChildKiller + Send + Sync>,
    pub process_id: Option<u32>,
    pub writer: Box<dyn Write + Send>,
}

impl PtyHandle {
    #[cfg(unix)]
    fn process_group_id(&self) -> Option<libc::pid_t> {
        self.process_id
            .filter(|pid| *pid > 0)
            .map(|pid| pid as libc::pid_t)
    }

    #[cfg(unix)]
    fn signal_process_group(&self, pgid: libc::pid_t, signal: i32) -> Result<()> {
        let result = unsafe { libc::kill(-pgid, signal) };
        if result == -1 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::ESRCH) {
                return Ok(());
            }
            return Err(err.into());
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn kill_process_group(&mut self) -> Result<()> {
        self.child_killer.kill()?;
        Ok(())
    }

    #[cfg(unix)]
    fn kill_process_group(&mut self) -> Result<()> {
        if let Some(pgid) = self.process_group_id() {
            // portable-pty uses setsid() on spawn, so pid == pgid for the child.
            if self.signal_process_group(pgid, libc::SIGHUP).is_ok() {
                return Ok(());
            }
        }

        self.child_killer.kill()?;
        Ok(())
    }
}

impl TerminalSession for PtyHandle {
    #[cfg(target_os = "linux")]
    fn current_dir(&self) -> Option<PathBuf> {
        let pid = self.process_id?;
        std::fs::read_link(format!("/proc/{}/cwd", pid)).ok()
    }

    #[cfg(not(target_os = "linux"))]
    fn current_dir(&self) -> Option<PathBuf> {
        None
    }

    fn send_input(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.writer.flush()?;
        Ok(())
    }

    fn resize(&self, rows: u16, cols: u16) -> Result<()> {
        self.master.resize(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        })?;
        Ok(())
    }

    fn kill(&mut self) -> Result<()> {
        self.kill_process_group()
    }
}

/// Spawns the user's shell in native PTYs and pumps output into the
/// action channel from one reader thread per terminal.
pub struct PtyManager {
    pty_system: Box<dyn PtySystem>,
    pty_tx: mpsc::Sender<Action>,
    shell: String,
    size: Cell<(u16, u16)>,
}

impl PtyManager {
    pub fn new(pty_tx: mpsc::Sender<Action>, rows: u16, cols: u16) -> Self {
        Self {
            pty_system: native_pty_system(),
            pty_tx,
            shell: user_shell(),
            size: Cell::new((rows.max(1), cols.max(1))),
        }
    }

    fn read_pty_output(
        terminal_id: TerminalId,
        reader: &mut Box<dyn Read + Send>,
        pty_tx: mpsc::Sender<Action>,
        mut child: Box<dyn Child + Send + Sync>,
    ) {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => {
                    // EOF - process exited; wait for real exit status
                    let exit_code = match child.wait() {
                        Ok(status) => status.exit_code() as i32,
                        Err(_) => 1,
                    };
                    let _ = pty_tx.blocking_send(Action::TerminalExited(terminal_id, exit_code));
                    break;
                }
                Ok(n) => {
                    let data = buf[..n].to_vec();
                    if pty_tx.blocking_send(Action::PtyOutput(terminal_id, data)).is_err() {
                        break;
                    }
                }
                Err(_) => {
                    let _ = pty_tx.blocking_send(Action::TerminalExited(terminal_id, 1));
                    break;
                }
            }
        }
    }
}

impl TerminalBackend for PtyManager {
    fn spawn(&self, terminal_id: TerminalId, working_dir: &Path) -> Result<Box<dyn TerminalSession>> {
        let (rows, cols) = self.size.get();
        let pair = self
            .pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .context("Failed to open PTY")?;

        let mut cmd = CommandBuilder::new(&self.shell);
        cmd.cwd(working_dir);
        cmd.env("TERM", "xterm-256color");
        cmd.env("LINES", rows.to_string());
        cmd.env("COLUMNS", cols.to_string());

        let child = pair
            .slave
            .spawn_command(cmd)
            .context("Failed to spawn shell")?;
        let child_killer = child.clone_killer();
        let process_id = child.process_id();

        let mut reader = pair
            .master
            .try_clone_reader()
            .context("Failed to clone PTY reader")?;
        let writer = pair
            .master
            .take_writer()
            .context("Failed to take PTY writer")?;

        let pty_tx = self.pty_tx.clone();
        std::thread::spawn(move || {
            Self::read_pty_output(terminal_id, &mut reader, pty_tx, child);
        });

        tracing::info!(
            event = "pty.spawn_completed",
            terminal_id = %terminal_id,
            working_dir = %working_dir.display(),
            pid = ?process_id,
        );

        Ok(Box::new(PtyHandle {
            master: pair.master,
            child_killer,
            process_id,
            writer,
        }))
    }

    fn screen_size(&self) -> (u16, u16) {
        self.size.get()
    }

    fn set_screen_size(&self, rows: u16, cols: u16) {
        self.size.set((rows.max(1), cols.max(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portable_pty::ExitStatus;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    #[derive(Debug)]
    struct DummyMaster;

    impl MasterPty for DummyMaster {
        fn resize(&self, _size: PtySize) -> std::result::Result<(), anyhow::Error> {
            Err(anyhow::anyhow!("unused"))
        }

        fn get_size(&self) -> std::result::Result<PtySize, anyhow::Error> {
            Err(anyhow::anyhow!("unused"))
        }

        fn try_clone_reader(&self) -> std::result::Result<Box<dyn Read + Send>, anyhow::Error> {
            Err(anyhow::anyhow!("unused"))
        }

        fn take_writer(
            &self,
        ) -> std::result::Result<Box<dyn io::Write + Send>, anyhow::Error> {
            Err(anyhow::anyhow!("unused"))
        }

        #[cfg(unix)]
        fn process_group_leader(&self) -> Option<libc::pid_t> {
            None
        }

        #[cfg(unix)]
        fn as_raw_fd(&self) -> Option<std::os::unix::io::RawFd> {
            None
        }
    }

    #[derive(Debug)]
    struct TestChild {
        exit_status: ExitStatus,
    }

    #[derive(Debug)]
    struct TestChildKiller {
        calls: Arc<AtomicUsize>,
    }

    impl ChildKiller for TestChildKiller {
        fn kill(&mut self) -> io::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn clone_killer(&self) -> Box<dyn ChildKiller + Send + Sync> {
            Box::new(TestChildKiller {
                calls: self.calls.clone(),
            })
        }
    }

    impl ChildKiller for TestChild {
        fn kill(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn clone_killer(&self) -> Box<dyn ChildKiller + Send + Sync> {
            Box::new(TestChildKiller {
                calls: Arc::new(AtomicUsize::new(0)),
            })
        }
    }

    impl Child for TestChild {
        fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
            Ok(Some(self.exit_status.clone()))
        }

        fn wait(&mut self) -> io::Result<ExitStatus> {
            Ok(self.exit_status.clone())
        }

        fn process_id(&self) -> Option<u32> {
            None
        }

        #[cfg(windows)]
        fn as_raw_handle(&self) -> Option<std::os::windows::io::RawHandle> {
            None
        }
    }

    struct ChunkedReader {
        chunks: Vec<Vec<u8>>,
        index: usize,
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.index >= self.chunks.len() {
                return Ok(0);
            }
            let chunk = &self.chunks[self.index];
            let len = chunk.len().min(buf.len());
            buf[..len].copy_from_slice(&chunk[..len]);
            self.index += 1;
            Ok(len)
        }
    }

    #[test]
    fn pty_reader_emits_output_then_exit() {
        let (tx, mut rx) = mpsc::channel(10);
        let terminal_id = Uuid::new_v4();
        let mut reader: Box<dyn Read + Send> = Box::new(ChunkedReader {
            chunks: vec![b"hello".to_vec(), b"world".to_vec()],
            index: 0,
        });
        let child = Box::new(TestChild {
            exit_status: ExitStatus::with_exit_code(3),
        });

        PtyManager::read_pty_output(terminal_id, &mut reader, tx, child);

        let mut actions = Vec::new();
        while let Ok(action) = rx.try_recv() {
            actions.push(action);
        }

        assert_eq!(actions.len(), 3);
        assert!(matches!(
            &actions[0],
            Action::PtyOutput(id, data) if *id == terminal_id && data == b"hello"
        ));
        assert!(matches!(
            &actions[1],
            Action::PtyOutput(id, data) if *id == terminal_id && data == b"world"
        ));
        assert!(matches!(
            &actions[2],
            Action::TerminalExited(id, code) if *id == terminal_id && *code == 3
        ));
    }

    #[test]
    fn pty_handle_kill_uses_child_killer_when_no_pid() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut handle = PtyHandle {
            master: Box::new(DummyMaster),
            child_killer: Box::new(TestChildKiller { calls: calls.clone() }),
            process_id: None,
            writer: Box::new(io::sink()),
        };

        handle.kill().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pty_handle_without_pid_has_no_cwd() {
        let handle = PtyHandle {
            master: Box::new(DummyMaster),
            child_killer: Box::new(TestChildKiller {
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            process_id: None,
            writer: Box::new(io::sink()),
        };
        assert_eq!(handle.current_dir(), None);
    }
}
