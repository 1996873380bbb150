//! Terminal rendering of session state.

use colored::Colorize;

use carfinder_core::catalog::{Car, FilterOptions};
use carfinder_core::chat::ChatMessage;
use carfinder_core::filter::FilterState;

pub fn print_cars(cars: &[Car]) {
    if cars.is_empty() {
        println!("{}", "No cars match the current filters.".bright_black());
        return;
    }

    println!("{}", format!("{} cars found", cars.len()).bright_magenta().bold());
    for car in cars {
        println!(
            "  {} {} {}  {}  {}  {} / {}",
            car.year,
            car.make.bold(),
            car.model,
            format!("${}", car.price).bright_green(),
            format!("{} mi", car.mileage).bright_black(),
            car.color,
            car.bodytype,
        );
    }
}

pub fn print_filters(filters: &FilterState) {
    if filters.is_empty() {
        println!("{}", "No filters set.".bright_black());
        return;
    }

    println!("{}", "Filters:".bright_magenta().bold());
    for (facet, value) in filters.active() {
        println!("  {} = {}", facet.ui_name().cyan(), value);
    }
}

pub fn print_options(options: &FilterOptions) {
    if options.is_empty() {
        println!("{}", "No filter options available.".bright_black());
        return;
    }

    let years: Vec<String> = options.years.iter().map(|y| y.to_string()).collect();
    for (label, values) in [
        ("makes", options.makes.join(", ")),
        ("models", options.models.join(", ")),
        ("colors", options.colors.join(", ")),
        ("bodytypes", options.bodytypes.join(", ")),
        ("years", years.join(", ")),
    ] {
        println!("{} {}", format!("{label}:").cyan(), values);
    }
}

pub fn print_message(message: &ChatMessage) {
    if message.is_user() {
        println!("{}", format!("> {}", message.text).green());
    } else {
        for line in message.text.lines() {
            println!("{}", line.bright_blue());
        }
    }
}

pub fn print_history(history: &[ChatMessage]) {
    if history.is_empty() {
        println!("{}", "No messages yet.".bright_black());
        return;
    }
    for message in history {
        print_message(message);
    }
}
