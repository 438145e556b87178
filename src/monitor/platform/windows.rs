//! Windows connectivity change listener using `NotifyIpInterfaceChange`.

use crate::monitor::{ChangeListener, ListenerError};
use std::ffi::c_void;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_stream::Stream;
use windows::Win32::Foundation::{HANDLE, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    CancelMibChangeNotify2, MIB_IPINTERFACE_ROW, MIB_NOTIFICATION_TYPE, NotifyIpInterfaceChange,
};
use windows::Win32::Networking::WinSock::AF_UNSPEC;

/// Windows implementation of [`ChangeListener`].
///
/// Interface changes (link up/down, Wi-Fi association, adapter enable) are
/// a superset of active-network changes, so every callback is forwarded as a
/// re-probe signal.
#[derive(Debug, Default)]
pub struct WindowsChangeListener {
    _private: (),
}

impl WindowsChangeListener {
    /// Creates a new Windows change listener.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl ChangeListener for WindowsChangeListener {
    type Stream = WindowsChangeStream;

    fn into_stream(self) -> Self::Stream {
        WindowsChangeStream::register()
    }
}

/// Stream of interface change signals from the Windows IP Helper API.
///
/// Dropping the stream cancels the OS registration.
pub struct WindowsChangeStream {
    receiver: UnboundedReceiver<()>,
    registration: Option<Registration>,
    /// Registration error not yet reported to the consumer.
    pending_error: Option<ListenerError>,
    terminated: bool,
}

impl std::fmt::Debug for WindowsChangeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowsChangeStream")
            .field("registered", &self.registration.is_some())
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

/// RAII guard for a `NotifyIpInterfaceChange` registration.
///
/// Owns the boxed sender handed to Windows as the callback context.
struct Registration {
    handle: HANDLE,
    context: *mut UnboundedSender<()>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        // SAFETY: handle came from NotifyIpInterfaceChange and is cancelled once.
        let _ = unsafe { CancelMibChangeNotify2(self.handle) };

        // SAFETY: after cancellation Windows no longer invokes the callback,
        // so the context can be reclaimed. Dropping the sender closes the channel.
        drop(unsafe { Box::from_raw(self.context) });
    }
}

// SAFETY: CancelMibChangeNotify2 may be called from any thread, and the
// context is an UnboundedSender, which is Send.
unsafe impl Send for Registration {}

impl WindowsChangeStream {
    fn register() -> Self {
        let (sender, receiver) = unbounded_channel();

        let (registration, pending_error) = match register_notification(sender) {
            Ok(registration) => (Some(registration), None),
            Err(e) => (None, Some(e)),
        };

        Self {
            receiver,
            registration,
            pending_error,
            terminated: false,
        }
    }
}

impl Stream for WindowsChangeStream {
    type Item = Result<(), ListenerError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        if let Some(e) = self.pending_error.take() {
            self.terminated = true;
            return Poll::Ready(Some(Err(e)));
        }

        match self.receiver.poll_recv(cx) {
            Poll::Ready(Some(())) => Poll::Ready(Some(Ok(()))),
            Poll::Ready(None) => {
                self.terminated = true;
                Poll::Ready(Some(Err(ListenerError::Stopped)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Registers for IP interface change notifications.
///
/// The sender is leaked into the callback context and reclaimed by
/// [`Registration`]'s `Drop`.
#[cfg(not(tarpaulin_include))]
fn register_notification(sender: UnboundedSender<()>) -> Result<Registration, ListenerError> {
    let context = Box::into_raw(Box::new(sender));
    let mut handle = HANDLE::default();

    // SAFETY: callback and context stay valid until CancelMibChangeNotify2.
    let result = unsafe {
        NotifyIpInterfaceChange(
            AF_UNSPEC,
            Some(interface_change_callback),
            Some(context.cast::<c_void>()),
            false,
            &raw mut handle,
        )
    };

    if result != NO_ERROR {
        // SAFETY: registration failed, Windows holds no reference to context.
        drop(unsafe { Box::from_raw(context) });
        return Err(windows::core::Error::from(WIN32_ERROR(result.0)).into());
    }

    Ok(Registration { handle, context })
}

/// Invoked by the Windows thread pool on every interface change.
#[cfg(not(tarpaulin_include))]
unsafe extern "system" fn interface_change_callback(
    caller_context: *const c_void,
    _row: *const MIB_IPINTERFACE_ROW,
    _notification_type: MIB_NOTIFICATION_TYPE,
) {
    if caller_context.is_null() {
        return;
    }

    // SAFETY: context was set in register_notification and outlives the registration.
    let sender = unsafe { &*caller_context.cast::<UnboundedSender<()>>() };

    // UnboundedSender::send is non-blocking and safe from foreign threads.
    let _ = sender.send(());
}
