//! Optional concurrent line parsing (§5): a producer splits a
//! document's text into lines, a
//! [`pool::ThreadPool`] parses each line independently (line parsing
//! consults no shared state), and a collector folds the results back
//! into a [`kofi_model::Document`] in line order.
//!
//! Single-threaded parsing via `kofi_parser::parse` is fully equivalent
//! and observably identical; this crate exists for documents large
//! enough that parsing them one line at a time on one thread is the
//! bottleneck.

#![deny(unused)]
#![deny(warnings)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_rust_codeblocks)]

mod pool;

use std::num::NonZeroUsize;

use kofi_errors::ParseError;
use kofi_model::Document;
use kofi_parser::ParserOptions;

pub use pool::ThreadPool;

/// Parse `text` the same way `kofi_parser::parse` does, but with each
/// line parsed independently on a pool of up to `pool_size` threads.
///
/// Errors surface deterministically: if multiple lines are malformed,
/// the one reported is always the line with the lowest line number,
/// regardless of which worker happened to finish first — the collector
/// awaits each line's result in line order and returns on the first
/// failure it observes, abandoning (not forcibly cancelling) whichever
/// other lines are still being worked on.
pub fn parse_concurrently(
    text: &str,
    options: &ParserOptions,
    pool_size: NonZeroUsize,
) -> Result<Document, ParseError> {
    kofi_parser::check_trailing_newline(text, options)?;

    let pool = ThreadPool::new(pool_size).expect("failed to determine available parallelism");
    let lines = kofi_parser::split_lines(text);

    let replies: Vec<_> = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let line = line.to_string();
            let line_number = index as u32 + 1;
            let options = *options;

            pool.execute(async move { kofi_parser::parse_element(&line, line_number, &options) })
                .expect("the pool's receiver outlives this sender")
        })
        .collect();

    let mut elements = Vec::with_capacity(replies.len());

    for reply in replies {
        let element = smol::block_on(reply).expect("a submitted job always sends its reply")?;
        elements.push(element);
    }

    Ok(kofi_parser::fold_elements(elements))
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use kofi_errors::ParseErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn pool_size() -> NonZeroUsize {
        NonZeroUsize::new(4).unwrap()
    }

    #[test]
    fn matches_sequential_parsing() {
        let text = "[s]\na=1\n; note\n[s]\nb=2\n";
        let options = ParserOptions::default();

        let sequential = kofi_parser::parse(text, &options).unwrap();
        let concurrent = parse_concurrently(text, &options, pool_size()).unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[test]
    fn reports_the_lowest_numbered_malformed_line() {
        let text = "a = 1\nb = \nc = \"unterminated\n";
        let options = ParserOptions::default();

        let error = parse_concurrently(text, &options, pool_size()).unwrap_err();
        assert_eq!(error.line(), 2);
        assert_eq!(*error.kind(), ParseErrorKind::PropertyValueExpected);
    }

    #[test]
    fn honors_strict_trailing_newline() {
        let options = ParserOptions::default().strict_trailing_newline(true);
        let error = parse_concurrently("key = 1", &options, pool_size()).unwrap_err();
        assert_eq!(*error.kind(), ParseErrorKind::MissingTrailingNewline);
    }
}
