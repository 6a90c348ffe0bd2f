//! Basic usage example for the nxcomb library.
//!
//! This example demonstrates single-line extraction, batch extraction
//! over an in-memory source, and the error cases a caller must handle.

use nxcomb::{BatchReader, LineSource, Parser};
use std::io::Cursor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== nxcomb Basic Usage Example ===\n");

    // Example 1: Extracting one line
    single_line_example()?;

    // Example 2: Batch extraction over a source
    batch_example()?;

    // Example 3: Error handling
    error_handling_example()?;

    Ok(())
}

/// Example 1: Extracting the fields of a single combined-format line
fn single_line_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Single-Line Extraction");
    println!("-------------------------");

    let log_line = r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET /index.html HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#;

    println!("Log line: {}", log_line);
    println!();

    let parser = Parser::new();
    let record = parser.parse(log_line)?;

    println!("Extracted fields:");
    println!("  IP:            {:?}", record.ip);
    println!("  Timestamp:     {:?}", record.timestamp);
    println!("  Method:        {:?}", record.method);
    println!("  Path:          {:?}", record.path);
    println!("  Status:        {:?}", record.status);
    println!("  Response time: {:?}", record.response_time_ms);
    println!("  User agent:    {:?}", record.user_agent);

    println!("\n");
    Ok(())
}

/// Example 2: Batch extraction with window and partition bookkeeping
fn batch_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Batch Extraction");
    println!("-------------------");

    let log_data = r#"127.0.0.1 - - [11/Dec/2015:11:59:20 +0000] "GET /api/users HTTP/1.1" 200 1024 "-" "curl/7.29.0" 0.007
192.168.1.1 - - [11/Dec/2015:12:00:01 +0000] "POST /api/users HTTP/1.1" 201 256 "-" "curl/7.29.0" 0.014
10.0.0.1 - - [11/Dec/2015:12:00:02 +0000] "GET /api/users/123 HTTP/1.1" 200 512 "-" "curl/7.29.0" 0.003
172.16.0.1 - - [11/Dec/2015:12:00:03 +0000] "DELETE /api/users/456 HTTP/1.1" 404 0 "-" "curl/7.29.0" 0.002"#;

    let source = LineSource::new(Cursor::new(log_data), 2)?;
    let mut batch = BatchReader::new(source);

    println!("Total rows:        {}", batch.total_rows());
    println!("Partition (fresh): {:?}", batch.current_partition());
    println!();

    let mut start = 0;
    while start < batch.total_rows() {
        let parsed = batch.parse_batch(start)?.len() as u64;
        if parsed == 0 {
            break;
        }

        println!(
            "Batch at offset {} (partition {:?}):",
            start,
            batch.current_partition()
        );
        for record in batch.last_batch() {
            println!(
                "  {} {} -> {}",
                record.method.as_deref().unwrap_or("-"),
                record.path.as_deref().unwrap_or("-"),
                record.status.as_deref().unwrap_or("-"),
            );
        }

        start += parsed;
    }

    println!("\n");
    Ok(())
}

/// Example 3: The error cases a caller must handle
fn error_handling_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("3. Error Handling");
    println!("-----------------");

    let parser = Parser::new();

    // Example 3a: A field that finds no match is simply unset
    println!("3a. Missing fields are not errors:");
    let record = parser.parse(r#"- - - "GET / HTTP/1.1" 200"#)?;
    println!("  IP:         {:?}", record.ip);
    println!("  Timestamp:  {:?}", record.timestamp);
    println!("  Status:     {:?}", record.status);

    // Example 3b: A shape-matched but invalid timestamp is fatal
    println!("\n3b. Malformed timestamp:");
    let line = r#"127.0.0.1 - - [32/Dec/2015:11:59:20 +0000] "GET / HTTP/1.1" 200 612 "-" "curl/7.29.0" 0.001"#;
    match parser.parse(line) {
        Ok(_) => println!("  Unexpected success"),
        Err(e) => println!("  Error: {}", e),
    }

    println!();
    Ok(())
}
