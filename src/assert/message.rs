//! Streaming-connection message assertions.
//!
//! A connection is anything that can hand over its next text message. The check
//! performs exactly one read and relies on the source's own blocking behaviour;
//! no read timeout is applied here. Wrap the call in
//! [`within`](crate::timing::within::within) when a bound is needed.

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::mpsc;

use crate::error::HelperError;
use crate::report::{Failure, FailureSink};

/// Blocking source of text messages, such as a websocket connection.
pub trait MessageSource {
    /// Read error type.
    type Error: Display;

    /// Block until the next message arrives.
    fn next_message(&mut self) -> Result<String, Self::Error>;
}

impl MessageSource for mpsc::Receiver<String> {
    type Error = mpsc::RecvError;

    fn next_message(&mut self) -> Result<String, Self::Error> {
        self.recv()
    }
}

impl MessageSource for VecDeque<String> {
    type Error = HelperError;

    fn next_message(&mut self) -> Result<String, Self::Error> {
        self.pop_front().ok_or(HelperError::StreamClosed)
    }
}

/// Read one message from `source` and report a non-fatal failure if it is not `want`.
///
/// A read error is reported as a failure as well.
#[track_caller]
pub fn assert_message<S, M>(sink: &S, source: &mut M, want: &str)
where
    S: FailureSink + ?Sized,
    M: MessageSource + ?Sized,
{
    match source.next_message() {
        Ok(got) if got == want => {}
        Ok(got) => sink.report(Failure::error(format!("got {got:?}, want {want:?}"))),
        Err(err) => sink.report(Failure::error(format!(
            "could not read message ({err}), want {want:?}"
        ))),
    }
}

#[cfg(feature = "tokio-helpers")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio-helpers")))]
pub use self::nonblocking::{AsyncMessageSource, assert_message_async};

#[cfg(feature = "tokio-helpers")]
mod nonblocking {
    use std::fmt::Display;
    use std::future::Future;
    use std::panic::Location;

    use crate::error::HelperError;
    use crate::report::{Failure, FailureSink, Severity};

    /// Asynchronous source of text messages.
    pub trait AsyncMessageSource {
        /// Read error type.
        type Error: Display;

        /// Wait for the next message.
        fn next_message(&mut self) -> impl Future<Output = Result<String, Self::Error>>;
    }

    impl AsyncMessageSource for tokio::sync::mpsc::Receiver<String> {
        type Error = HelperError;

        async fn next_message(&mut self) -> Result<String, Self::Error> {
            self.recv().await.ok_or(HelperError::StreamClosed)
        }
    }

    impl AsyncMessageSource for tokio::sync::mpsc::UnboundedReceiver<String> {
        type Error = HelperError;

        async fn next_message(&mut self) -> Result<String, Self::Error> {
            self.recv().await.ok_or(HelperError::StreamClosed)
        }
    }

    /// Await one message from `source` and report a non-fatal failure if it is not `want`.
    #[track_caller]
    pub fn assert_message_async<'a, S, M>(
        sink: &'a S,
        source: &'a mut M,
        want: &'a str,
    ) -> impl Future<Output = ()> + 'a
    where
        S: FailureSink + ?Sized,
        M: AsyncMessageSource + ?Sized,
    {
        let location = Location::caller();
        async move {
            let message = match source.next_message().await {
                Ok(got) if got == want => return,
                Ok(got) => format!("got {got:?}, want {want:?}"),
                Err(err) => format!("could not read message ({err}), want {want:?}"),
            };
            sink.report(Failure::at(Severity::Error, message, location));
        }
    }
}
