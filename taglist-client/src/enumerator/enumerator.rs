//! Controller and program tag enumeration
//!
//! # Enumeration Flow
//!
//! 1. **Controller listing**: request `@tags`, decode the response and
//!    report every record. Names starting with `Program:` are collected as
//!    program scopes in discovery order.
//! 2. **Program listings**: request `<program>.@tags` for each collected
//!    program, one after the other, and report their records.
//!
//! Only one level of program nesting is listed. A failing controller
//! listing ends the run. A failing program listing ends the run under
//! [`ProgramFailurePolicy::Abort`] and is recorded in the report under
//! [`ProgramFailurePolicy::Continue`].

use super::config::{EnumeratorConfig, ProgramFailurePolicy};
use super::observer::ListingObserver;
use super::report::{EnumerationReport, ListingScope, ProgramOutcome, ProgramReport};
use super::state::EnumerationState;
use taglist_core::{decode, PlcFamily, ProgramEntry, TagListResult};
use taglist_transport::{ListingRequest, ListingTransport};

/// Result of decoding one listing
struct ScopeListing {
    tag_count: usize,
    programs: Vec<ProgramEntry>,
}

/// Enumerator driving controller and program listings over a transport
///
/// # Usage Example
///
/// ```rust,no_run
/// use taglist_client::{CollectingObserver, EnumeratorConfig, TagEnumerator};
/// use taglist_core::PlcFamily;
/// use taglist_transport::ReplayTransport;
///
/// # async fn run() -> taglist_core::TagListResult<()> {
/// let transport = ReplayTransport::from_file("capture.json")?;
/// let config = EnumeratorConfig::new("10.0.0.5", Some("1,0"), PlcFamily::ControlLogix);
/// let mut enumerator = TagEnumerator::new(transport, config);
///
/// let mut observer = CollectingObserver::new();
/// let report = enumerator.enumerate(&mut observer).await?;
/// println!("{} programs", report.programs.len());
/// # Ok(())
/// # }
/// ```
pub struct TagEnumerator<T: ListingTransport> {
    transport: T,
    config: EnumeratorConfig,
    state: EnumerationState,
}

impl<T: ListingTransport> TagEnumerator<T> {
    /// Create an enumerator; nothing is sent until [`enumerate`](Self::enumerate)
    pub fn new(transport: T, config: EnumeratorConfig) -> Self {
        Self {
            transport,
            config,
            state: EnumerationState::NotStarted,
        }
    }

    /// Current run state
    pub fn state(&self) -> EnumerationState {
        self.state
    }

    /// Run configuration
    pub fn config(&self) -> &EnumeratorConfig {
        &self.config
    }

    /// Transport the listings are issued on
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the enumerator and give the transport back
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// List the controller and every program scope found in it
    ///
    /// Each decoded record is handed to `observer` as soon as it is decoded.
    /// Calling this again starts a new run.
    ///
    /// # Errors
    /// Returns the controller listing's error, or the first program error
    /// under [`ProgramFailurePolicy::Abort`]. In both cases the state ends
    /// as [`EnumerationState::Failed`].
    pub async fn enumerate<O>(&mut self, observer: &mut O) -> TagListResult<EnumerationReport>
    where
        O: ListingObserver + ?Sized,
    {
        self.state = EnumerationState::RootListing;
        log::info!(
            "Listing controller tags of {} ({})",
            self.config.gateway,
            self.config.family
        );

        let root = match self.list_scope(&ListingScope::Controller, observer).await {
            Ok(listing) => listing,
            Err(e) => {
                self.state = EnumerationState::Failed;
                return Err(e);
            }
        };
        log::info!(
            "Controller listing has {} tags and {} programs",
            root.tag_count,
            root.programs.len()
        );

        let mut report = EnumerationReport {
            gateway: self.config.gateway.clone(),
            family: self.config.family,
            controller_tags: root.tag_count,
            programs: Vec::with_capacity(root.programs.len()),
        };

        for (index, program) in root.programs.into_iter().enumerate() {
            self.state = EnumerationState::ProgramListing(index);
            let scope = ListingScope::Program(program.clone());

            let outcome = match self.list_scope(&scope, observer).await {
                Ok(listing) => ProgramOutcome::Listed {
                    tag_count: listing.tag_count,
                },
                Err(e) => match self.config.failure_policy {
                    ProgramFailurePolicy::Abort => {
                        self.state = EnumerationState::Failed;
                        return Err(e);
                    }
                    ProgramFailurePolicy::Continue => {
                        log::warn!("Skipping {}: {}", program, e);
                        ProgramOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                },
            };
            report.programs.push(ProgramReport { program, outcome });
        }

        self.state = EnumerationState::Done;
        Ok(report)
    }

    async fn list_scope<O>(
        &mut self,
        scope: &ListingScope,
        observer: &mut O,
    ) -> TagListResult<ScopeListing>
    where
        O: ListingObserver + ?Sized,
    {
        let result = self.fetch_and_decode(scope, observer).await;
        if let Err(e) = &result {
            log::debug!("Listing of {} failed: {}", scope, e);
            observer.listing_failed(scope, e);
        }
        result
    }

    async fn fetch_and_decode<O>(
        &mut self,
        scope: &ListingScope,
        observer: &mut O,
    ) -> TagListResult<ScopeListing>
    where
        O: ListingObserver + ?Sized,
    {
        let descriptor = self.config.descriptor(scope.program())?;
        observer.listing_started(scope);

        let label = scope.to_string();
        let timeout = self.config.timeout;
        let mut request =
            ListingRequest::open(&mut self.transport, &descriptor, &label, timeout).await?;
        let buffer = request.fetch(timeout).await?;
        // destroy status is advisory once the buffer is held
        let destroy_status = request.close();
        if !destroy_status.is_ok() {
            log::debug!("Keeping {} listing despite destroy status {}", scope, destroy_status);
        }

        let mut listing = ScopeListing {
            tag_count: 0,
            programs: Vec::new(),
        };
        let mut decoder = decode(&buffer);
        for record in decoder.by_ref() {
            observer.record(scope, &record);
            listing.tag_count += 1;

            if scope.is_controller() {
                if let Some(entry) = record.program_entry() {
                    if !listing.programs.contains(&entry) {
                        listing.programs.push(entry);
                    }
                }
            }
        }
        if decoder.is_truncated() {
            log::debug!(
                "Listing of {} ended on a truncated record after {} of {} bytes",
                scope,
                decoder.offset(),
                buffer.len()
            );
        }

        observer.listing_finished(scope, listing.tag_count);
        Ok(listing)
    }
}

/// List a controller and its programs with the default configuration
///
/// Uses the default timeout and aborts on the first failing program.
pub async fn enumerate<T, O>(
    transport: T,
    gateway: &str,
    path: Option<&str>,
    family: PlcFamily,
    observer: &mut O,
) -> TagListResult<EnumerationReport>
where
    T: ListingTransport,
    O: ListingObserver + ?Sized,
{
    let config = EnumeratorConfig::new(gateway, path, family);
    TagEnumerator::new(transport, config).enumerate(observer).await
}
