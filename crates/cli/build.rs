use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let format_arg = || {
        clap::arg!(-f --format <FORMAT> "Output format (json, summary)")
            .value_name("FORMAT")
            .value_parser(["json", "summary", "text"])
    };

    let mut cmd = clap::Command::new("siteconf")
        .version("1.0.0")
        .author("Siteconf Contributors")
        .about("Parse and inspect FTR site extraction configs")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(
            clap::Command::new("parse")
                .about("Parse a single config file")
                .arg(clap::arg!(<FILE> "Config file to parse").value_parser(clap::value_parser!(PathBuf)))
                .arg(format_arg().default_value("json")),
        )
        .subcommand(
            clap::Command::new("load")
                .about("Load every config in a directory")
                .arg(clap::arg!([DIR] "Config directory").value_parser(clap::value_parser!(PathBuf)))
                .arg(clap::arg!(-c --concurrency <NUM> "Maximum number of files read at once").default_value("10"))
                .arg(clap::arg!(--extension <EXT> "Only load files with this extension"))
                .arg(clap::arg!(--lossy "Replace invalid UTF-8 instead of skipping the file"))
                .arg(format_arg().default_value("summary")),
        )
        .subcommand(
            clap::Command::new("lookup")
                .about("Find the config that applies to a URL")
                .arg(clap::arg!(<URL> "Page URL"))
                .arg(clap::arg!(--dir <DIR> "Config directory").value_parser(clap::value_parser!(PathBuf)))
                .arg(format_arg().default_value("summary")),
        )
        .subcommand(
            clap::Command::new("replace")
                .about("Apply a config's string replacements to an HTML file")
                .arg(clap::arg!(<INPUT> "HTML file to rewrite").value_parser(clap::value_parser!(PathBuf)))
                .arg(
                    clap::arg!(-c --config <FILE> "Config file providing the replacements")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "siteconf", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "siteconf", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "siteconf", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "siteconf", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
