#![no_main]

use libfuzzer_sys::fuzz_target;

use wikiextract::extractor::{
    ScrapeProfile,
    cleaner::{clean_content, html_to_plain_text, truncate},
    scrape::parse_article,
};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let html = String::from_utf8_lossy(data);

    // Neither the normalizer nor the page walk may panic on arbitrary markup
    let _ = html_to_plain_text(&html);

    for profile in [ScrapeProfile::primary(), ScrapeProfile::simplified()] {
        let content = clean_content(&parse_article(&html, &profile));
        assert!(content.starts_with("# "));
        let _ = truncate(&content, 10_000);
    }
});
