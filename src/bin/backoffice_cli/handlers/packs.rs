#![deny(clippy::all, clippy::pedantic)]

use backoffice::application::pack_editor::{EditorOpen, PackEditor};
use backoffice::application::validation::encode_flag;
use backoffice::domain::draft::PackDraft;
use backoffice::domain::filters::FilterSet;
use backoffice::domain::records::RecordId;
use backoffice::domain::resources::{ActionKind, ResourceKind};
use serde::Serialize;
use tracing::debug;

use crate::args::{PackUpdateArgs, PacksCmd};
use crate::client::{CliError, Ctx};
use crate::handlers::resource;
use crate::io::read_opt_value;
use crate::print::print_json;

const KIND: ResourceKind = ResourceKind::Packs;

#[derive(Debug, Serialize)]
struct SavedPack<'a> {
    id: &'a RecordId,
    message: &'a str,
    draft: &'a PackDraft,
}

pub async fn handle(ctx: &Ctx, cmd: PacksCmd) -> Result<(), CliError> {
    match cmd {
        PacksCmd::List {
            category,
            active,
            search,
            page,
        } => {
            let filters = FilterSet::new()
                .with("category", category.as_deref())
                .with("is_active", active.map(encode_flag))
                .with("search", search.as_deref());
            resource::list(ctx, KIND, filters, page).await
        }
        PacksCmd::Show { id } => resource::show(ctx, KIND, id).await,
        PacksCmd::Draft { id } => {
            let editor = open(ctx, id).await?;
            print_json(editor.draft())
        }
        PacksCmd::Update(args) => update(ctx, args).await,
        PacksCmd::Delete { id, yes } => resource::delete(ctx, KIND, id, yes).await,
    }
}

async fn open(ctx: &Ctx, id: String) -> Result<Box<PackEditor>, CliError> {
    let opened = PackEditor::open(
        ctx.api.clone(),
        ctx.notifier.clone(),
        RecordId::new(id),
        &ctx.settings.packs.categories,
    )
    .await;
    match opened {
        EditorOpen::Ready(editor) => Ok(editor),
        EditorOpen::Redirect { to, error } => {
            debug!(to = %to, "pack editor closed");
            Err(error.into())
        }
    }
}

async fn update(ctx: &Ctx, args: PackUpdateArgs) -> Result<(), CliError> {
    let description = read_opt_value(args.description.clone(), args.description_file.clone())?;
    let mut editor = open(ctx, args.id.clone()).await?;
    apply_edits(editor.draft_mut(), args, description)?;

    let ack = editor.save().await?;
    print_json(&SavedPack {
        id: editor.id(),
        message: ack.message_or(ActionKind::Update.success_message()),
        draft: editor.draft(),
    })
}

/// Merge command-line edits into the loaded draft. Benefit edits apply in
/// order: replace, remove, append.
pub fn apply_edits(
    draft: &mut PackDraft,
    args: PackUpdateArgs,
    description: Option<String>,
) -> Result<(), CliError> {
    if let Some(category) = args.category {
        draft.category = category;
    }
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(description) = description {
        draft.description = description;
    }
    if let Some(price) = args.price {
        draft.price = price;
    }
    if let Some(duration) = args.duration_days {
        draft.duration_days = duration;
    }
    if !args.benefits.is_empty() {
        draft.benefits = args.benefits;
    }

    let mut positions = args.remove_benefit;
    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions.dedup();
    for position in positions {
        position
            .checked_sub(1)
            .and_then(|index| draft.remove_benefit(index))
            .ok_or_else(|| CliError::InvalidInput(format!("no benefit at position {position}")))?;
    }
    for benefit in args.add_benefit {
        draft.add_benefit(benefit);
    }

    if let Some(active) = args.active {
        draft.is_active = active;
    }
    if let Some(popular) = args.popular {
        draft.is_popular = popular;
    }
    Ok(())
}
