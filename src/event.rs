use std::{
    io,
    sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender},
    thread::{self, JoinHandle},
    time::Duration,
};

pub type EventSender = Sender<Event>;
pub type EventReceiver = Receiver<Event>;

pub struct Listener {
    sender: EventSender,
    receiver: EventReceiver,
}

impl Default for Listener {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }
}

impl Listener {
    pub fn subscribe(&self) -> EventSender {
        self.sender.clone()
    }

    /// Next event, with an interrupt already in the queue winning over a tick.
    /// Ticks queued behind the returned one are dropped.
    pub fn next(&self) -> Result<Event, std::sync::mpsc::RecvError> {
        let event = self.receiver.recv()?;
        if event == Event::Tick {
            if let Some(other) = self.receiver.try_iter().find(|e| *e != Event::Tick) {
                return Ok(other);
            }
        }
        Ok(event)
    }
}

enum TimerControl {
    Rearm,
    Stop,
}

/// Sends `Event::Tick` one period after it was last armed.
///
/// After each tick the timer stays idle until `rearm`, so a slow tick never
/// lets ticks pile up behind it. Waits are `recv_timeout` on a private
/// control channel, so `kill` wakes the thread immediately.
pub struct Timer {
    thread: JoinHandle<()>,
    control: Sender<TimerControl>,
}

impl Timer {
    pub fn spawn(sender: EventSender, period: Duration) -> Self {
        let (control, controls) = channel::<TimerControl>();
        let thread = thread::spawn(move || loop {
            match controls.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    match controls.recv() {
                        Ok(TimerControl::Rearm) => {}
                        Ok(TimerControl::Stop) | Err(_) => break,
                    }
                }
                Ok(TimerControl::Rearm) => {}
                Ok(TimerControl::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self { thread, control }
    }

    /// Starts the next period, counted from now.
    pub fn rearm(&self) {
        self.control.send(TimerControl::Rearm).ok();
    }

    pub fn kill(self) {
        self.control.send(TimerControl::Stop).ok();
        if self.thread.join().is_err() {
            log::warn!("timer thread panicked");
        }
    }
}

#[cfg(unix)]
type Interrupts = tokio::signal::unix::Signal;

#[cfg(unix)]
fn interrupts() -> io::Result<Interrupts> {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
}

#[cfg(windows)]
type Interrupts = tokio::signal::windows::CtrlC;

#[cfg(windows)]
fn interrupts() -> io::Result<Interrupts> {
    tokio::signal::windows::ctrl_c()
}

/// Forwards the first interrupt (Ctrl-C / SIGINT) as `Event::Interrupt`.
///
/// The handler is registered before `spawn` returns, so the default
/// "terminate now" action never applies once the producer exists.
pub struct SignalProducer {
    _thread: JoinHandle<()>,
}

impl SignalProducer {
    pub fn spawn(sender: EventSender) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let mut interrupt = {
            let _guard = runtime.enter();
            interrupts()?
        };

        let thread = thread::spawn(move || match runtime.block_on(interrupt.recv()) {
            Some(()) => {
                sender.send(Event::Interrupt).ok();
            }
            None => log::error!("interrupt listener closed"),
        });

        Ok(Self { _thread: thread })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Tick,
    Interrupt,
}
