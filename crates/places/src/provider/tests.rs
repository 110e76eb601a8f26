use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;

struct EchoProvider;

#[async_trait]
impl SuggestionProvider for EchoProvider {
	async fn lookup(&self, request: &LookupRequest) -> Result<LookupResponse> {
		Ok(LookupResponse::ok(vec![Suggestion::new(
			"echo",
			request.text.clone(),
			request.text.clone(),
			"",
		)]))
	}

	async fn fetch_details(&self, request: &DetailsRequest) -> Result<PlaceDetails> {
		Err(ProviderError::DetailsUnavailable {
			id: request.id.clone(),
		})
	}
}

/// Fails the first `failures` loads, then succeeds.
struct FlakyLoader {
	loads: Arc<AtomicUsize>,
	failures: usize,
	delay: Duration,
}

#[async_trait]
impl ProviderLoader for FlakyLoader {
	async fn load(&self) -> Result<Arc<dyn SuggestionProvider>> {
		let n = self.loads.fetch_add(1, Ordering::SeqCst);
		tokio::time::sleep(self.delay).await;
		if n < self.failures {
			return Err(ProviderError::Transport("script failed to load".to_string()));
		}
		Ok(Arc::new(EchoProvider))
	}
}

fn lazy(failures: usize, delay: Duration) -> (LazyProvider, Arc<AtomicUsize>) {
	let loads = Arc::new(AtomicUsize::new(0));
	let provider = LazyProvider::new(FlakyLoader {
		loads: loads.clone(),
		failures,
		delay,
	});
	(provider, loads)
}

#[test]
fn status_parsing_and_grouping() {
	assert_eq!(LookupStatus::from_wire("OK"), LookupStatus::Ok);
	assert_eq!(LookupStatus::from_wire("ZERO_RESULTS"), LookupStatus::ZeroResults);
	assert_eq!(LookupStatus::from_wire("REQUEST_DENIED"), LookupStatus::RequestDenied);
	assert_eq!(LookupStatus::from_wire("INVALID_REQUEST"), LookupStatus::InvalidRequest);
	assert_eq!(LookupStatus::from_wire("UNKNOWN_ERROR"), LookupStatus::Other);

	assert!(LookupStatus::ZeroResults.populates_list());
	assert!(LookupStatus::Other.is_denial());
	assert!(!LookupStatus::Ok.is_denial());
}

#[test]
fn empty_ok_response_normalizes_to_zero_results() {
	assert_eq!(LookupResponse::ok(Vec::new()).status, LookupStatus::ZeroResults);
}

#[test]
fn details_request_uses_default_fields() {
	let request = DetailsRequest::new("p1");
	assert_eq!(request.fields, vec!["formatted_address", "address_components", "geometry"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn concurrent_callers_share_one_load() {
	let (provider, loads) = lazy(0, Duration::from_millis(50));
	let request = LookupRequest::new("100 Main", "us");

	let (a, b) = tokio::join!(provider.lookup(&request), provider.lookup(&request));
	assert_eq!(a.unwrap().suggestions.len(), 1);
	assert_eq!(b.unwrap().suggestions.len(), 1);
	assert_eq!(loads.load(Ordering::SeqCst), 1);
	assert!(provider.is_ready());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn failed_load_is_retried_once() {
	let (provider, loads) = lazy(1, Duration::ZERO);

	let response = provider.lookup(&LookupRequest::new("100 Main", "us")).await.unwrap();
	assert_eq!(response.status, LookupStatus::Ok);
	assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn repeated_load_failure_is_unavailable() {
	let (provider, loads) = lazy(usize::MAX, Duration::ZERO);

	let err = provider.lookup(&LookupRequest::new("100 Main", "us")).await.unwrap_err();
	assert!(matches!(err, ProviderError::Unavailable(_)));
	assert_eq!(loads.load(Ordering::SeqCst), LOAD_ATTEMPTS);
	assert!(!provider.is_ready());
}
