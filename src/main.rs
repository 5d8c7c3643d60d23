/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process::exit;

use folia2oac::{Config, Configurable, Converter, DataFormat, FoliaError, OffsetUnit};

const HELP_ANNOTATION: &str = "FoLiA XML file with the (named entity) annotation of the source text. Set value to - for standard input.";
const HELP_SOURCE: &str = "URL or path of the source text the FoLiA document was derived from. This is either plain text, or an RDF document carrying the text in a chars property. The value is also used as the resource the annotation targets constrain.";

fn app() -> Command {
    Command::new("folia2oac")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts FoLiA named-entity annotations to Open Annotation RDF, with targets constrained to character offsets in the source text")
        .arg(
            Arg::new("annotation")
                .help(HELP_ANNOTATION)
                .required(true),
        )
        .arg(Arg::new("source").help(HELP_SOURCE).required(true))
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file, defaults to standard output")
                .default_value("-"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file (JSON), command line options take precedence"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("The entity set to extract, defaults to the Frog NER set for Dutch"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: rdfxml (default) or ntriples"),
        )
        .arg(
            Arg::new("offset-unit")
                .long("offset-unit")
                .help("Unit for offsets and ranges: unicode (codepoints, default), utf16 or bytes"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on malformed annotation instead of skipping the offending elements")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .short('d')
                .help("Produce verbose debug output on standard error")
                .action(ArgAction::SetTrue),
        )
}

fn config_from_args(args: &ArgMatches) -> Result<Config, FoliaError> {
    let mut config = if let Some(filename) = args.get_one::<String>("config") {
        Config::from_file(filename)?
    } else {
        Config::default()
    };
    if args.get_flag("debug") {
        config = config.with_debug(true);
    }
    if args.get_flag("strict") {
        config = config.with_strict(true);
    }
    if let Some(set) = args.get_one::<String>("set") {
        config = config.with_entity_set(set.as_str());
    }
    if let Some(format) = args.get_one::<String>("format") {
        config = config.with_dataformat(DataFormat::try_from(format.as_str())?);
    }
    if let Some(unit) = args.get_one::<String>("offset-unit") {
        config = config.with_offset_unit(OffsetUnit::try_from(unit.as_str())?);
    }
    Ok(config)
}

fn run(args: &ArgMatches) -> Result<(), FoliaError> {
    let config = config_from_args(args)?;
    let annotation = args
        .get_one::<String>("annotation")
        .ok_or(FoliaError::OtherError("No annotation file specified"))?;
    let source = args
        .get_one::<String>("source")
        .ok_or(FoliaError::OtherError("No source specified"))?;
    let output = args
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("-");

    let converter = Converter::new(config);
    let conversion = converter.convert(annotation, source)?;
    conversion.graph().to_file(output, converter.config())
}

fn main() {
    let args = app().get_matches();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.get_flag("debug") {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();
    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        exit(1);
    }
}
