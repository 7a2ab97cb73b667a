#![allow(clippy::print_stdout, clippy::print_stderr)]
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use oxclass::{
    compute_inferred, reasoned_subclasses_of, reasoned_superclasses_of, walk_subhierarchy,
    walk_superhierarchy, ClassLabelMap, Ontology, OntologyLoader, DEFAULT_ONTOLOGY_PATH,
    DEFAULT_ONTOLOGY_URL,
};
use oxrdf::NamedNode;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(about, version, name = "oxclass")]
/// OWL class hierarchy and label queries.
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print basic facts about an ontology document.
    Info {
        #[command(flatten)]
        source: Source,
    },
    /// List every class carrying the given label.
    Label {
        /// The rdfs:label value to resolve.
        label: String,
        #[command(flatten)]
        source: Source,
    },
    /// List the subclasses of a class.
    Subclasses {
        #[command(flatten)]
        target: Target,
        /// Query the classified hierarchy instead of the asserted axioms.
        #[arg(long)]
        reasoned: bool,
        /// Flatten the whole closure instead of listing direct neighbours
        /// only. Implies --reasoned.
        #[arg(long)]
        indirect: bool,
        #[command(flatten)]
        source: Source,
    },
    /// List the superclasses of a class.
    Superclasses {
        #[command(flatten)]
        target: Target,
        /// Query the classified hierarchy instead of the asserted axioms.
        #[arg(long)]
        reasoned: bool,
        /// Flatten the whole closure instead of listing direct neighbours
        /// only. Implies --reasoned.
        #[arg(long)]
        indirect: bool,
        #[command(flatten)]
        source: Source,
    },
    /// Classify the ontology and report consistency diagnostics.
    Classify {
        #[command(flatten)]
        source: Source,
    },
    /// Dump the classified hierarchy below (or above) a class.
    Walk {
        #[command(flatten)]
        target: Target,
        /// Walk superclasses instead of subclasses.
        #[arg(long)]
        up: bool,
        /// Expand the full closure at each level instead of direct
        /// neighbours.
        #[arg(long)]
        indirect: bool,
        #[command(flatten)]
        source: Source,
    },
}

#[derive(clap::Args)]
struct Source {
    /// Local ontology document to load.
    ///
    /// Without --file and --url, the conventional local copy is used when it
    /// exists and the public Gene Ontology URL otherwise.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,
    /// URL to fetch the ontology document from.
    #[arg(short, long, value_hint = ValueHint::Url, conflicts_with = "file")]
    url: Option<String>,
}

impl Source {
    fn load(&self) -> Result<Ontology> {
        let loader = OntologyLoader::new();
        if let Some(file) = &self.file {
            loader
                .load_from_file(file)
                .with_context(|| format!("Failed to load ontology from {}", file.display()))
        } else if let Some(url) = &self.url {
            loader
                .load_from_web(url)
                .with_context(|| format!("Failed to load ontology from {url}"))
        } else if Path::new(DEFAULT_ONTOLOGY_PATH).exists() {
            loader
                .load_from_file(DEFAULT_ONTOLOGY_PATH)
                .with_context(|| format!("Failed to load ontology from {DEFAULT_ONTOLOGY_PATH}"))
        } else {
            loader
                .load_from_web(DEFAULT_ONTOLOGY_URL)
                .with_context(|| format!("Failed to load ontology from {DEFAULT_ONTOLOGY_URL}"))
        }
    }
}

#[derive(clap::Args)]
struct Target {
    /// Pick the class by its rdfs:label value.
    #[arg(short, long)]
    label: Option<String>,
    /// Pick the class by its IRI.
    #[arg(short, long, conflicts_with = "label")]
    class: Option<String>,
}

impl Target {
    fn resolve(&self, ontology: &Ontology) -> Result<NamedNode> {
        match (&self.label, &self.class) {
            (Some(label), None) => {
                let matches = ontology.classes_with_label(label);
                match matches.as_slice() {
                    [] => bail!("No class carries the label {label:?}"),
                    [class] => Ok((*class).clone()),
                    many => bail!(
                        "The label {label:?} is ambiguous, pass --class with one of: {}",
                        many.iter()
                            .map(|c| c.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                }
            }
            (None, Some(class)) => Ok(NamedNode::new(class)
                .with_context(|| format!("{class} is not a valid class IRI"))?),
            _ => bail!("Pass exactly one of --label or --class"),
        }
    }
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Info { source } => {
            let ontology = source.load()?;
            println!("{ontology}");
            if let Some(location) = ontology.document_location() {
                println!("    from: {location}");
            }
            if let Some(version) = ontology.version_iri() {
                println!("    version: {version}");
            }
            let skipped = ontology.anonymous_expressions_skipped();
            if skipped > 0 {
                println!("    {skipped} anonymous class expressions skipped");
            }
            Ok(())
        }
        Command::Label { label, source } => {
            let ontology = source.load()?;
            let matches = ontology.classes_with_label(&label);
            if matches.is_empty() {
                bail!("No class carries the label {label:?}");
            }
            for class in matches {
                println!("{}", class.as_str());
            }
            Ok(())
        }
        Command::Subclasses {
            target,
            reasoned,
            indirect,
            source,
        } => {
            let ontology = source.load()?;
            let class = target.resolve(&ontology)?;
            let map = if reasoned || indirect {
                let reasoner = compute_inferred(&ontology)?;
                reasoned_subclasses_of(&ontology, &reasoner, &class, !indirect)
            } else {
                ontology.direct_subclasses_of(&class)
            };
            print_class_map(&map);
            Ok(())
        }
        Command::Superclasses {
            target,
            reasoned,
            indirect,
            source,
        } => {
            let ontology = source.load()?;
            let class = target.resolve(&ontology)?;
            let map = if reasoned || indirect {
                let reasoner = compute_inferred(&ontology)?;
                reasoned_superclasses_of(&ontology, &reasoner, &class, !indirect)
            } else {
                ontology.direct_superclasses_of(&class)
            };
            print_class_map(&map);
            Ok(())
        }
        Command::Classify { source } => {
            let ontology = source.load()?;
            let reasoner = compute_inferred(&ontology)?;
            let summary = reasoner.summary();
            println!("Consistent: {}", summary.consistent);
            println!("Reasoner name: {}", summary.reasoner_name);
            if summary.unsatisfiable.is_empty() {
                println!("There are no unsatisfiable classes");
            } else {
                println!("The following classes are unsatisfiable:");
                for class in &summary.unsatisfiable {
                    println!("    {}", class.as_str());
                }
            }
            Ok(())
        }
        Command::Walk {
            target,
            up,
            indirect,
            source,
        } => {
            let ontology = source.load()?;
            let class = target.resolve(&ontology)?;
            let reasoner = compute_inferred(&ontology)?;
            let steps = if up {
                walk_superhierarchy(&reasoner, &class, !indirect)
            } else {
                walk_subhierarchy(&reasoner, &class, !indirect)
            };
            for step in steps {
                println!(
                    "{}{}: {}",
                    "  ".repeat(step.depth),
                    step.representative.as_str(),
                    step.members
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                );
            }
            Ok(())
        }
    }
}

fn print_class_map(map: &ClassLabelMap) {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (class, label) in entries {
        match label {
            Some(label) => println!("{}\t{label}", class.as_str()),
            None => println!("{}", class.as_str()),
        }
    }
}
