//! School profile commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use schooladmin_core::result::AppResult;
use schooladmin_entity::school::{AboutDetails, AddressDetails, ImageSlot, Location};
use schooladmin_service::ImageUpload;

use crate::app::App;
use crate::output::{OutputFormat, print_item, print_success};

/// Arguments for `school`
#[derive(Debug, Args)]
pub struct SchoolArgs {
    #[command(subcommand)]
    pub command: SchoolCommands,
}

/// School subcommands
#[derive(Debug, Subcommand)]
pub enum SchoolCommands {
    /// Show the full profile
    Show,
    /// Edit name and address; unset flags keep their current value
    Update(AddressArgs),
    /// Replace the about lists
    About(AboutArgs),
    /// Set map coordinates
    Location(LocationArgs),
    /// Upload logo, principal photo, or gallery images
    Upload(UploadArgs),
}

#[derive(Debug, Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub landmark: Option<String>,
    #[arg(long)]
    pub bus_stand: Option<String>,
    #[arg(long)]
    pub metro_station: Option<String>,
    #[arg(long)]
    pub school_number: Option<String>,
}

#[derive(Debug, Args)]
pub struct AboutArgs {
    /// Achievement entry (repeatable)
    #[arg(long = "achievement")]
    pub achievements: Vec<String>,
    /// Amenity entry (repeatable)
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
    /// Offered service entry (repeatable)
    #[arg(long = "offered")]
    pub services_offered: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// SLOT=PATH pairs, slot being logo, principal, or image1..image10
    #[arg(required = true, value_parser = parse_upload)]
    pub files: Vec<(ImageSlot, PathBuf)>,
}

fn parse_upload(raw: &str) -> Result<(ImageSlot, PathBuf), String> {
    let (slot, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=PATH, got '{raw}'"))?;
    Ok((slot.parse()?, PathBuf::from(path)))
}

fn override_with(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

pub async fn execute(app: &App, args: &SchoolArgs, format: OutputFormat) -> AppResult<()> {
    let ctx = app.context().await?;
    match &args.command {
        SchoolCommands::Show => {
            let profile = app.school.profile(&ctx).await?;
            print_item(&profile, format);
        }
        SchoolCommands::Update(flags) => {
            let current = app.school.profile(&ctx).await?;
            let mut details = AddressDetails::from(&current);
            override_with(&mut details.name, &flags.name);
            override_with(&mut details.tag, &flags.tag);
            override_with(&mut details.address, &flags.address);
            override_with(&mut details.city, &flags.city);
            override_with(&mut details.landmark, &flags.landmark);
            override_with(&mut details.bus_stand, &flags.bus_stand);
            override_with(&mut details.metro_station, &flags.metro_station);
            override_with(&mut details.school_number, &flags.school_number);

            let profile = app.school.update_address(&ctx, &details).await?;
            print_success("School details saved");
            print_item(&profile, format);
        }
        SchoolCommands::About(flags) => {
            let current = app.school.profile(&ctx).await?;
            let mut details = AboutDetails::from(&current);
            if !flags.achievements.is_empty() {
                details.achievements = flags.achievements.clone();
            }
            if !flags.amenities.is_empty() {
                details.amenities = flags.amenities.clone();
            }
            if !flags.services_offered.is_empty() {
                details.services_offered = flags.services_offered.clone();
            }

            let profile = app.school.update_about(&ctx, &details).await?;
            print_success("About section saved");
            print_item(&profile, format);
        }
        SchoolCommands::Location(flags) => {
            let location = Location {
                latitude: flags.lat,
                longitude: flags.lng,
            };
            app.school.update_location(&ctx, location).await?;
            print_success(&format!("Location set to {}, {}", flags.lat, flags.lng));
        }
        SchoolCommands::Upload(flags) => {
            let mut uploads = Vec::with_capacity(flags.files.len());
            for (slot, path) in &flags.files {
                uploads.push(ImageUpload::from_path(*slot, path).await?);
            }
            let count = uploads.len();
            let profile = app.school.update_images(&ctx, uploads).await?;
            print_success(&format!("{count} image(s) uploaded"));
            print_item(&profile, format);
        }
    }
    Ok(())
}
