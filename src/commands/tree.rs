//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays, for one
//! environment, the fragment files discovery selects for every dataset.
//!
//! ```text
//! dev
//! ├─ catalogs
//! │  ├─ metadata/dev/team-a/catalogs.json
//! │  └─ metadata/catalogs.json
//! └─ metastores (no files)
//! ```
//!
//! Files are listed in merge order. This command is a safe, read-only
//! operation that does not parse or modify any files.

use std::borrow::Cow;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};

use envmeta::config::Layout;
use envmeta::dataset::DatasetKind;
use envmeta::environment::EnvironmentDirectory;
use envmeta::phases::discovery;

/// Display the fragment files feeding each dataset
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Name of the environment to inspect
    #[arg(value_name = "ENV")]
    pub env: String,

    /// Only show this dataset (e.g. "catalogs")
    #[arg(long, value_name = "DATASET", value_parser = parse_dataset)]
    pub dataset: Option<DatasetKind>,
}

fn parse_dataset(value: &str) -> std::result::Result<DatasetKind, String> {
    DatasetKind::from_name(value).ok_or_else(|| {
        let known: Vec<&str> = DatasetKind::ALL.iter().map(|k| k.name()).collect();
        format!("unknown dataset '{value}' (expected one of: {})", known.join(", "))
    })
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, layout: &Layout) -> Result<()> {
    let tree_root = build_tree(&args, layout)?;
    print_tree(&tree_root).context("Failed to display tree")?;
    Ok(())
}

fn build_tree(args: &TreeArgs, layout: &Layout) -> Result<TreeNode> {
    EnvironmentDirectory::load(layout)?.validate_exists(&args.env)?;

    let mut children = Vec::new();
    for kind in DatasetKind::ALL {
        if args.dataset.is_some_and(|only| only != kind) {
            continue;
        }
        let files = discovery::resolve_files(layout, &args.env, kind)
            .with_context(|| format!("Failed to resolve files for dataset {kind}"))?;
        let label = if files.is_empty() {
            format!("{kind} (no files)")
        } else {
            kind.to_string()
        };
        children.push(TreeNode {
            label,
            children: files
                .iter()
                .map(|file| TreeNode::leaf(file.display().to_string()))
                .collect(),
        });
    }

    Ok(TreeNode {
        label: args.env.clone(),
        children,
    })
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: Write>(&self, f: &mut W, _style: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
