//! Builds a few pipelines out of the stock sources, filters and sinks.

use bytes::Bytes;
use chunkpump::prelude::*;

fn main() -> Result<()> {
    println!("=== Single steps ===");
    let mut source = StringSource::with_block_size("abcdef", 3)?;
    let mut printer = sink_fn(|chunk: Chunk| {
        match &chunk {
            Chunk::Data(bytes) => println!("chunk: {}", String::from_utf8_lossy(bytes)),
            other => println!("signal: {:?}", other),
        }
        true
    });
    for _ in 0..3 {
        pump::step(&mut source, &mut printer);
    }

    println!("\n=== Line numbering filter ===");
    let numbered = Cycle::new(0usize, (), |line_no: &mut usize, input: Bytes, _: &()| {
        let mut out = Vec::new();
        for line in input.split(|c| *c == b'\n').filter(|l| !l.is_empty()) {
            *line_no += 1;
            out.extend_from_slice(format!("{:>3} ", line_no).as_bytes());
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        Chunk::data(out)
    });
    let report = Pipeline::new(StringSource::new("alpha\nbeta\ngamma\n"))
        .filter(numbered)
        .sink(WriterSink::new(std::io::stdout()))?;
    println!("{} chunks, {} bytes", report.chunks, report.bytes);

    println!("\n=== Failing source ===");
    let mut source = StringSource::new("partial").cat(ErrorSource::new("connection reset"));
    let ok = pump::drain(&mut source, &mut NullSink::new());
    println!("drain succeeded: {}", ok);

    Ok(())
}
