use std::fmt::Write;

use siteconf_core::SiteConfig;

/// Plain-text overview of a config: counts for list fields, flags, and any
/// login parameters that are set.
pub fn format_summary(name: &str, config: &SiteConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", name);

    let counts = [
        ("title", config.title.len()),
        ("body", config.body.len()),
        ("author", config.author.len()),
        ("date", config.date.len()),
        ("strip", config.strip.len()),
        ("strip_id_or_class", config.strip_id_or_class.len()),
        ("strip_image_src", config.strip_image_src.len()),
        ("native_ad_clue", config.native_ad_clue.len()),
        ("single_page_link", config.single_page_link.len()),
        ("next_page_link", config.next_page_link.len()),
        ("test_url", config.test_url.len()),
        ("http_headers", config.http_headers.len()),
        ("string_replacer", config.string_replacer.len()),
    ];
    for (label, count) in counts.iter().filter(|(_, count)| *count > 0) {
        let _ = writeln!(out, "  {:<22}{}", label, count);
    }

    let flags = [
        ("prune", config.prune),
        ("autodetect_on_failure", config.autodetect_on_failure),
        ("requires_login", config.requires_login),
    ];
    for (label, value) in flags {
        let _ = writeln!(out, "  {:<22}{}", label, if value { "yes" } else { "no" });
    }

    let login = [
        ("login_uri", &config.login_uri),
        ("login_username_field", &config.login_username_field),
        ("login_password_field", &config.login_password_field),
        ("not_logged_in", &config.not_logged_in),
    ];
    for (label, value) in login.iter().filter(|(_, value)| !value.is_empty()) {
        let _ = writeln!(out, "  {:<22}{}", label, value);
    }

    out
}
