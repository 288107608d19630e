//! Library API integration tests
use siteconf_core::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE_DIR: &str = "../../tests/fixtures/site_configs";

fn get_fixture_path(name: &str) -> String {
    format!("{}/{}", FIXTURE_DIR, name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_parse_news_fixture() {
    let config = ConfigParser::parse_string(&read_fixture("example.com.txt"));

    assert_eq!(config.title, vec!["//h1[@class='headline']", "//meta[@name='title']/@content"]);
    assert_eq!(config.body, vec!["//div[@id='story-body']"]);
    assert_eq!(config.author.len(), 1);
    assert_eq!(config.date.len(), 1);
    assert_eq!(config.strip_id_or_class, vec!["related-links", "newsletter-signup"]);
    assert_eq!(config.strip_image_src, vec!["tracking.gif"]);
    assert_eq!(config.native_ad_clue.len(), 1);
    assert_eq!(config.next_page_link, vec!["//a[@rel='next']"]);
    assert_eq!(config.test_url, vec!["http"]);

    assert!(!config.prune);
    assert!(!config.autodetect_on_failure);

    assert_eq!(config.http_headers.len(), 2);
    assert_eq!(config.http_headers["Cookie"], " euConsent=true");

    let pairs: Vec<_> = config.string_replacer.iter().collect();
    assert_eq!(
        pairs,
        vec![
            (" <p />", " <br /><br />"),
            ("<noscript>", " <div>"),
            ("</noscript>", " </div>"),
        ]
    );
}

#[test]
fn test_parse_login_fixture() {
    let config = ConfigParser::parse_string(&read_fixture("members.example.org.txt"));

    assert!(!config.requires_login);
    assert_eq!(config.login_uri, "/account/login");
    assert_eq!(config.login_username_field, "email");
    assert_eq!(config.login_password_field, "password");
    assert_eq!(config.not_logged_in, "//form[@id='login-form']");

    let extra = &config.login_extra_fields[0];
    assert_eq!(extra["remember_me"], vec!["1"]);
    assert_eq!(extra["source"], vec!["web"]);

    assert_eq!(config.http_headers.len(), 1);
    assert_eq!(config.http_headers["X-Odd)Name"], " 1");
}

#[test]
fn test_parse_file_matches_parse_string() {
    let from_file = ConfigParser::parse_file(get_fixture_path(".wikipedia.org.txt")).unwrap();
    let from_text = ConfigParser::parse_string(&read_fixture(".wikipedia.org.txt"));

    assert_eq!(from_file, from_text);
    assert_eq!(from_file.strip.len(), 2);
}

#[test]
fn test_text_replacer_on_fixture() {
    let config = ConfigParser::parse_string(&read_fixture("example.com.txt"));
    let replacer = TextReplacer::from_config(&config);

    let html = "<noscript><img src=\"a.png\"></noscript>";
    assert_eq!(replacer.apply(html), " <div><img src=\"a.png\"> </div>");
}

#[test]
fn test_site_config_json() {
    let config = ConfigParser::parse_string(&read_fixture("example.com.txt"));
    let json = config.to_json();

    assert!(json.is_object());
    assert_eq!(json["title"].as_array().unwrap().len(), 2);
    assert_eq!(json["string_replacer"]["<noscript>"], " <div>");
}

#[tokio::test]
async fn test_load_fixture_dir() {
    let report = ConfigLoader::new().load_dir(FIXTURE_DIR).await.unwrap();

    assert!(report.is_complete());
    assert_eq!(
        report.configs.names(),
        vec![".wikipedia.org.txt", "example.com.txt", "members.example.org.txt"]
    );

    for name in report.configs.names() {
        let standalone = ConfigParser::parse_string(&read_fixture(name));
        assert_eq!(report.configs.get(name), Some(&standalone));
    }
}

#[tokio::test]
async fn test_lookup_after_load() {
    let report = ConfigLoader::new().load_dir(FIXTURE_DIR).await.unwrap();
    let registry = report.configs;

    let (name, _) = registry.for_url("https://en.wikipedia.org/wiki/Rust").unwrap().unwrap();
    assert_eq!(name, ".wikipedia.org.txt");

    let (name, config) = registry.for_host("www.example.com").unwrap();
    assert_eq!(name, "example.com.txt");
    assert!(config.has_extraction_config());

    assert!(registry.for_host("unknown.test").is_none());
}

#[tokio::test]
async fn test_load_dir_reports_failures_without_aborting() {
    let tmp = TempDir::new().unwrap();
    for i in 0..12 {
        fs::write(tmp.path().join(format!("site{i}.com.txt")), format!("body: //div[@id='b{i}']\n")).unwrap();
    }
    fs::write(tmp.path().join("bad.com.txt"), [0xc3, 0x28]).unwrap();

    let loader = ConfigLoader::with_config(LoaderConfig::builder().concurrency(4).build());
    let report = loader.load_dir(tmp.path()).await.unwrap();

    assert_eq!(report.configs.len(), 12);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, SiteconfError::InvalidEncoding(_)));
}

#[tokio::test]
async fn test_load_missing_dir() {
    let result = ConfigLoader::new().load_dir("../../tests/fixtures/no_such_dir").await;
    assert!(matches!(result, Err(SiteconfError::DirectoryNotFound(_))));
}
