//! Controller tag listing CLI.
//!
//! Provides the `tag_list` binary, which lists the controller-scoped tags of
//! a controller followed by the tags of every program found in it. Listing
//! responses are replayed from a capture file through the same enumerator
//! a live transport would drive.
//!
//! ```text
//! tag_list <gateway> [path] [family] --replay capture.json
//! ```
//!
//! Exit codes: 0 on success, 1 on a fatal failure, 3 when some programs
//! could not be listed under `--continue-on-error`.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

use taglist::client::{
    CollectingObserver, EnumerationReport, EnumeratorBuilder, ListingObserver, ListingScope,
    ProgramOutcome, TagEnumerator,
};
use taglist::transport::ReplayTransport;
use taglist::{PlcFamily, SymbolRecord};

const EXIT_FATAL: i32 = 1;
const EXIT_PARTIAL: i32 = 3;

/// List controller and program tags.
#[derive(Parser)]
#[command(name = "tag_list", about = "List controller and program tags")]
struct Cli {
    /// Host name or IP address of the controller gateway.
    gateway: String,

    /// Routing path to the CPU, e.g. 1,0 (empty for Micro800/MicroLogix).
    path: Option<String>,

    /// Controller family: controllogix, micro800, micrologix, omron-njnx.
    family: Option<String>,

    /// Capture file with the listing responses to replay.
    #[arg(short, long)]
    replay: PathBuf,

    /// Timeout for each request in milliseconds.
    #[arg(short, long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Keep listing the remaining programs when one program fails.
    #[arg(short, long)]
    continue_on_error: bool,

    /// Print the result as JSON instead of one line per tag.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Prints each listing as it is decoded.
///
/// The first write error is kept and stops further output.
struct PrintObserver<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PrintObserver<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> ListingObserver for PrintObserver<W> {
    fn listing_started(&mut self, scope: &ListingScope) {
        if let ListingScope::Program(program) = scope {
            self.line(format_args!("\n{}!", program));
        }
    }

    fn record(&mut self, _scope: &ListingScope, record: &SymbolRecord) {
        self.line(format_args!("{}", record));
    }

    fn listing_finished(&mut self, scope: &ListingScope, _tag_count: usize) {
        if scope.is_controller() {
            self.line(format_args!("Program tags"));
        }
    }
}

#[derive(Serialize)]
struct JsonListing<'a> {
    scope: String,
    tags: &'a [SymbolRecord],
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: Option<&'a EnumerationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    listings: Vec<JsonListing<'a>>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli, &mut io::stdout().lock());
    match &result {
        Ok(report) => {
            for failed in report.failed_programs() {
                if let ProgramOutcome::Failed { error } = &failed.outcome {
                    eprintln!("warning: {} was not listed: {}", failed.program, error);
                }
            }
        }
        Err(e) => eprintln!("error: {:#}", e),
    }
    process::exit(exit_code(&result));
}

fn exit_code(result: &anyhow::Result<EnumerationReport>) -> i32 {
    match result {
        Ok(report) if report.is_complete() => 0,
        Ok(_) => EXIT_PARTIAL,
        Err(_) => EXIT_FATAL,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<EnumerationReport> {
    if cli.gateway.is_empty() {
        bail!("Hostname or IP address must not be zero length");
    }

    let family = match cli.family.as_deref() {
        Some(name) => name.parse::<PlcFamily>()?,
        None => PlcFamily::DEFAULT,
    };

    let transport = ReplayTransport::from_file(&cli.replay)
        .with_context(|| format!("loading capture {}", cli.replay.display()))?;
    let mut enumerator = EnumeratorBuilder::new()
        .gateway(&cli.gateway)
        .path(cli.path.as_deref().unwrap_or(""))
        .family(family)
        .timeout(Duration::from_millis(cli.timeout_ms))
        .continue_on_error(cli.continue_on_error)
        .build(transport)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    if cli.json {
        return runtime.block_on(run_json(enumerator, out));
    }

    let mut observer = PrintObserver::new(out);
    let result = runtime.block_on(enumerator.enumerate(&mut observer));
    let write_error = observer.error.take();
    let report = result?;
    if let Some(e) = write_error {
        return Err(e).context("writing tag listing");
    }
    log::info!("Listed {} tags", report.total_tags());
    Ok(report)
}

/// Enumerate and print one JSON document, also when the run fails part way.
async fn run_json<W: Write>(
    mut enumerator: TagEnumerator<ReplayTransport>,
    out: &mut W,
) -> anyhow::Result<EnumerationReport> {
    let mut observer = CollectingObserver::new();
    let result = enumerator.enumerate(&mut observer).await;

    let output = JsonOutput {
        report: result.as_ref().ok(),
        error: result.as_ref().err().map(|e| e.to_string()),
        listings: observer
            .listings()
            .iter()
            .map(|l| JsonListing {
                scope: l.scope.to_string(),
                tags: &l.records,
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &output).context("writing JSON output")?;
    writeln!(out).context("writing JSON output")?;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taglist::client::ProgramReport;
    use taglist::transport::Capture;

    #[test]
    fn test_two_argument_form_uses_default_family() {
        let cli =
            Cli::try_parse_from(["tag_list", "10.0.0.5", "1,0", "--replay", "c.json"]).unwrap();
        assert_eq!(cli.gateway, "10.0.0.5");
        assert_eq!(cli.path.as_deref(), Some("1,0"));
        assert!(cli.family.is_none());
        assert_eq!(cli.timeout_ms, 5000);
        assert!(!cli.continue_on_error);
    }

    #[test]
    fn test_family_and_flags() {
        let cli = Cli::try_parse_from([
            "tag_list",
            "10.0.0.9",
            "",
            "micro800",
            "-r",
            "c.json",
            "--continue-on-error",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.family.as_deref(), Some("micro800"));
        assert!(cli.continue_on_error);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_gateway_is_required() {
        assert!(Cli::try_parse_from(["tag_list", "--replay", "c.json"]).is_err());
    }

    #[test]
    fn test_print_observer_format() {
        let mut observer = PrintObserver::new(Vec::new());
        let record = SymbolRecord {
            instance_id: 0x2a,
            symbol_type: 0xc4,
            element_length: 4,
            array_dims: [0, 0, 0],
            name: "TempSensor".to_string(),
        };
        observer.record(&ListingScope::Controller, &record);
        observer.listing_finished(&ListingScope::Controller, 1);

        let text = String::from_utf8(observer.out).unwrap();
        assert_eq!(
            text,
            "tag_name=TempSensor; tag_instance_id=2a; tag_type=c4; element_length=4; array_dimensions=(0, 0, 0)\nProgram tags\n"
        );
    }

    const DEMO_CAPTURE: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../demos/controllogix_capture.json"
    );

    fn entry(instance_id: u32, name: &str) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&instance_id.to_le_bytes());
        out.extend_from_slice(&0x00c4u16.to_le_bytes());
        out.extend_from_slice(&4u16.to_le_bytes());
        out.extend_from_slice(&[0u8; 12]);
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out
    }

    /// Root listing `A`, `Program:X`; the program listing has no response.
    fn broken_program_capture() -> tempfile::NamedTempFile {
        let mut root = entry(1, "A");
        root.extend(entry(2, "Program:X"));
        let mut capture = Capture::new();
        capture.insert_response("@tags", root);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(capture.to_json().unwrap().as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(["tag_list", "10.0.0.5", "1,0"].iter().chain(args)).unwrap()
    }

    fn report(programs: Vec<ProgramReport>) -> EnumerationReport {
        EnumerationReport {
            gateway: "10.0.0.5".to_string(),
            family: PlcFamily::ControlLogix,
            controller_tags: 1,
            programs,
        }
    }

    #[test]
    fn test_exit_codes() {
        let program = SymbolRecord {
            instance_id: 1,
            symbol_type: 0x1068,
            element_length: 0,
            array_dims: [0, 0, 0],
            name: "Program:Main".to_string(),
        }
        .program_entry()
        .unwrap();
        let listed = report(vec![ProgramReport {
            program: program.clone(),
            outcome: ProgramOutcome::Listed { tag_count: 2 },
        }]);
        let partial = report(vec![ProgramReport {
            program,
            outcome: ProgramOutcome::Failed {
                error: "read failed".to_string(),
            },
        }]);

        assert_eq!(exit_code(&Ok(listed)), 0);
        assert_eq!(exit_code(&Ok(partial)), EXIT_PARTIAL);
        assert_eq!(exit_code(&Err(anyhow::anyhow!("boom"))), EXIT_FATAL);
    }

    #[test]
    fn test_run_demo_capture() {
        let mut out = Vec::new();
        let result = run(cli(&["--replay", DEMO_CAPTURE]), &mut out);
        assert_eq!(exit_code(&result), 0);
        assert_eq!(result.unwrap().total_tags(), 7);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("tag_name=TempSensor;"));
        assert!(text.contains("\nProgram tags\n\nProgram:MainProgram!\n"));
        assert!(text.contains("\nProgram:Alarms!\ntag_name=HighTemp;"));
    }

    #[test]
    fn test_run_missing_capture_is_fatal() {
        let result = run(cli(&["--replay", "/nonexistent/capture.json"]), &mut Vec::new());
        assert_eq!(exit_code(&result), EXIT_FATAL);
    }

    #[test]
    fn test_run_partial_under_continue() {
        let capture = broken_program_capture();
        let path = capture.path().to_str().unwrap();
        let result = run(cli(&["--replay", path, "--continue-on-error"]), &mut Vec::new());
        assert_eq!(exit_code(&result), EXIT_PARTIAL);
    }

    #[test]
    fn test_json_keeps_root_listing_when_program_aborts() {
        let capture = broken_program_capture();
        let path = capture.path().to_str().unwrap();
        let mut out = Vec::new();
        let result = run(cli(&["--replay", path, "--json"]), &mut out);
        assert_eq!(exit_code(&result), EXIT_FATAL);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(json["report"].is_null());
        assert!(json["error"].as_str().unwrap().contains("Program:X"));
        let listings = json["listings"].as_array().unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["scope"], "controller");
        assert_eq!(listings[0]["tags"][0]["name"], "A");
        assert_eq!(listings[0]["tags"][1]["name"], "Program:X");
    }

    #[test]
    fn test_json_complete_run_has_no_error() {
        let mut out = Vec::new();
        run(cli(&["--replay", DEMO_CAPTURE, "--json"]), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["report"]["controller_tags"], 4);
        assert_eq!(json["listings"].as_array().unwrap().len(), 3);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_fails_run() {
        let err = run(cli(&["--replay", DEMO_CAPTURE]), &mut ClosedPipe).unwrap_err();
        assert!(err.to_string().contains("writing tag listing"));
        assert_eq!(
            err.downcast_ref::<io::Error>().map(|e| e.kind()),
            Some(io::ErrorKind::BrokenPipe)
        );
    }
}
