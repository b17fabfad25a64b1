//! Shared wire types and the paging stream used for Data API list endpoints.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

type OneFuturePage<'a, F, T> =
    Pin<Box<dyn Future<Output = eyre::Result<(F, (VecDeque<T>, Option<String>))>> + 'a + Send>>;

/// A forward-only stream over a paginated list endpoint.
///
/// Items are yielded one at a time; the next page is only requested once the current one is
/// drained *and* the consumer polls again. An optional page limit caps how many requests the
/// stream will ever issue, which is how callers bound quota spend on very long feeds.
///
/// The fetcher receives the continuation token (`None` for the first page) and returns the
/// page's items plus the token for the page after it. Returning `None` as the next token ends
/// the stream.
pub struct PagedStream<'a, T, F> {
    current_items: VecDeque<T>,
    pending_request: Option<OneFuturePage<'a, F, T>>,
    pages_requested: usize,
    page_limit: Option<usize>,
    is_done: bool,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    /// Create a stream that follows continuation tokens until the endpoint runs out.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
    {
        Self::start(fetcher, None)
    }

    /// Create a stream that issues at most `max_pages` requests.
    ///
    /// A limit of zero yields nothing and makes no requests.
    pub fn with_page_limit<Fut>(fetcher: F, max_pages: usize) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
    {
        Self::start(fetcher, Some(max_pages))
    }

    fn start<Fut>(fetcher: F, page_limit: Option<usize>) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
    {
        if page_limit == Some(0) {
            return Self {
                current_items: VecDeque::new(),
                pending_request: None,
                pages_requested: 0,
                page_limit,
                is_done: true,
            };
        }

        let first_page = async move {
            let results = fetcher(None).await?;
            Ok((fetcher, results))
        };
        Self {
            current_items: VecDeque::new(),
            pending_request: Some(Box::pin(first_page)),
            pages_requested: 1,
            page_limit,
            is_done: false,
        }
    }

    /// Number of page requests this stream has started so far.
    pub fn pages_requested(&self) -> usize {
        self.pages_requested
    }

    fn may_request_more(&self) -> bool {
        self.page_limit
            .is_none_or(|limit| self.pages_requested < limit)
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = eyre::Result<(VecDeque<T>, Option<String>)>> + Send + 'a,
{
    type Item = eyre::Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.current_items.extend(items);
                    self.pending_request = None;

                    match next_token {
                        Some(next_token) if self.may_request_more() => {
                            // set up, but don't poll, the next page
                            self.pages_requested += 1;
                            self.pending_request = Some(Box::pin(async move {
                                let results = fetcher(Some(next_token)).await?;
                                Ok((fetcher, results))
                            }));
                        }
                        Some(_) => {
                            tracing::debug!(
                                pages = self.pages_requested,
                                "page limit reached, not following continuation token"
                            );
                            self.is_done = true;
                        }
                        None => self.is_done = true,
                    }
                }
                Poll::Ready(Err(e)) => {
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_stream::StreamExt;

    fn numbered_pages(
        calls: &AtomicUsize,
        pages: usize,
    ) -> impl Fn(
        Option<String>,
    ) -> std::future::Ready<eyre::Result<(VecDeque<usize>, Option<String>)>>
    + Send
    + '_ {
        move |token| {
            calls.fetch_add(1, Ordering::SeqCst);
            let page: usize = token.as_deref().map_or(0, |t| t.parse().unwrap());
            let items = (page * 2..page * 2 + 2).collect();
            let next = (page + 1 < pages).then(|| (page + 1).to_string());
            std::future::ready(Ok((items, next)))
        }
    }

    #[tokio::test]
    async fn follows_tokens_to_the_end() {
        let calls = AtomicUsize::new(0);
        let stream = PagedStream::new(numbered_pages(&calls, 3));
        let items: Vec<_> = stream.collect::<eyre::Result<_>>().await.unwrap();
        assert_eq!(items, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn page_limit_caps_requests() {
        let calls = AtomicUsize::new(0);
        let stream = PagedStream::with_page_limit(numbered_pages(&calls, 10), 2);
        let items: Vec<_> = stream.collect::<eyre::Result<_>>().await.unwrap();
        assert_eq!(items, vec![0, 1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_page_limit_makes_no_requests() {
        let calls = AtomicUsize::new(0);
        let mut stream = PagedStream::with_page_limit(numbered_pages(&calls, 10), 0);
        assert!(stream.next().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn next_page_is_lazy() {
        let calls = AtomicUsize::new(0);
        let mut stream = PagedStream::new(numbered_pages(&calls, 10));
        assert_eq!(stream.next().await.unwrap().unwrap(), 0);
        assert_eq!(stream.next().await.unwrap().unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
