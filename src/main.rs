//! Calendar page CLI.
//!
//! # Usage
//! ```ignore
//! calview                       // Month containing today
//! calview 2024-02-15            // February 2024
//! calview -f week -n 1          // Next week
//! calview -t 1                  // Toggle to the next format
//! ```

use calview::args::{Args, parse_date};
use calview::component::CalendarComponent;
use calview::error::CalendarError;
use calview::formatter::{format_markers, format_page_grid};
use calview::types::CalendarConfig;

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("calview: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CalendarError> {
    let config = CalendarConfig::new(args)?;
    let selected = args.select.as_deref().map(parse_date).transpose()?;

    let mut calendar = CalendarComponent::new(config)?;
    calendar.on_format_changed(|format| println!("format changed: {}", format));
    calendar.on_day_selected(|date| println!("day selected: {}", date));

    // Replay order: today > toggles > paging > selection
    if args.today {
        calendar.jump_to_today();
    }
    for _ in 0..args.toggle {
        if calendar.toggle_calendar_format().is_none() {
            eprintln!("calview: format toggle is disabled");
            break;
        }
    }
    for _ in 0..args.prev {
        calendar.select_previous();
    }
    for _ in 0..args.next {
        calendar.select_next();
    }
    if let Some(date) = selected {
        calendar.select_date(date);
    }

    let snapshot = calendar.snapshot();
    log::info!("rendering page {:?}", snapshot.page_id);
    for line in format_page_grid(&snapshot, args.color()) {
        println!("{}", line);
    }
    let markers = format_markers(&snapshot);
    if !markers.is_empty() {
        println!();
        for line in markers {
            println!("{}", line);
        }
    }

    Ok(())
}
