//! Awaitable result of a spawned JWT operation

use crate::error::{JwtError, JwtResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Resolves to the result a background task sends over its oneshot channel
#[must_use = "futures do nothing unless awaited"]
pub struct AsyncJwtResult<T> {
    receiver: oneshot::Receiver<JwtResult<T>>,
}

impl<T> AsyncJwtResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<JwtResult<T>>) -> Self {
        Self { receiver }
    }

    /// Already-settled result, for early failures or work run inline
    pub(crate) fn ready(result: JwtResult<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        // Receiver is alive in `rx`
        let _ = tx.send(result);
        Self::new(rx)
    }
}

impl<T> Future for AsyncJwtResult<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::internal("Channel closed"))),
            Poll::Pending => Poll::Pending,
        }
    }
}
