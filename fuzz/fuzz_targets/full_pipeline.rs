#![no_main]

//! Fuzz target for the full list -> validate -> parse -> convert pipeline.
//!
//! Runs over in-memory sources, so any per-item problem must surface in the
//! outcome rather than as a panic.

use fwconv_core::OutputNaming;
use fwconv_core::adapters::{InMemoryDataSource, InMemorySink, InMemorySpecSource};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct PipelineInput {
    specs: Vec<(String, String)>,
    data: Vec<(String, String)>,
    naming: NamingChoice,
}

#[derive(Debug, arbitrary::Arbitrary)]
enum NamingChoice {
    Auto,
    Spec,
    DataSource,
}

fuzz_target!(|input: PipelineInput| {
    let specs = input
        .specs
        .into_iter()
        .fold(InMemorySpecSource::new(), |s, (name, body)| s.with(name, body));
    let data = input
        .data
        .into_iter()
        .fold(InMemoryDataSource::new(), |d, (name, body)| d.with(name, body));
    let naming = match input.naming {
        NamingChoice::Auto => OutputNaming::Auto,
        NamingChoice::Spec => OutputNaming::Spec,
        NamingChoice::DataSource => OutputNaming::DataSource,
    };

    let sink = InMemorySink::new();
    let Ok(outcome) = fwconv_core::run(naming, &specs, &data, &sink) else {
        return;
    };

    for output in &outcome.outputs {
        let contents = sink.contents(&output.output).expect("output exists");
        if !outcome.overwrites.contains(&output.output) {
            assert_eq!(contents.lines().count() as u64, output.records);
        }
    }
});
