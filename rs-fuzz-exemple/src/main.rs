use rs_fuzz_core::{CharNgram, KeyBy, MatchOptions, ReturnScope, Scoring};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // One matcher owns one profile cache; every call below reuses it
    let matcher = CharNgram::new();

    let percentage = MatchOptions::new(Scoring::Percentage, 2);
    let matches = MatchOptions::new(Scoring::Matches, 2);

    println!("Comparing an input string against a reference string, getting score:\n");

    let pairs = [
        ("testing", "testing"),
        ("testing", "test"),
        ("testing", "coding"),
        ("testing", "hello"),
        ("Fluorine", "floreen"),
        ("Gandalf and Frodo walked across Middle-earth", "gondolf plus fredo took a walk on earth"),
    ];
    for (reference, input) in pairs {
        println!(
            "Comparing \"{input}\" to \"{reference}\": {}% match, {} ngram matches",
            matcher.compare_string(reference, input, &percentage).value(),
            matcher.compare_string(reference, input, &matches),
        );
    }

    // A larger n-gram size is stricter: fewer, longer n-grams must line up
    let trigrams = MatchOptions::new(Scoring::Percentage, 3);
    println!(
        "Comparing \"test\" to \"testing\": {} match (ngram size 3)",
        matcher.compare_string("testing", "test", &trigrams)
    );

    let elements = [
        "Hydrogen", "Helium", "Lithium", "Beryllium", "Boron", "Carbon", "Nitrogen", "Oxygen", "Fluorine", "Neon",
    ];

    println!("\nComparing an input string against a list of reference strings:\n");

    // Every candidate, sorted by score then by length
    let all = MatchOptions { scope: ReturnScope::All, ..percentage };
    for entry in matcher.compare_list(&elements, "floreen", &all)? {
        println!("  {}: {}", entry.key, entry.score);
    }

    // Only the candidates tied for the best score, identified by position
    let top_by_index = MatchOptions { key_by: KeyBy::Index, ..matches };
    for entry in matcher.compare_list(&elements, "um", &top_by_index)? {
        println!("  {}: {}", entry.key, entry.score);
    }

    println!("\nGetting the best match from a list of reference strings:\n");

    for input in ["floreen", "hydro", "zazozuzezizy"] {
        match matcher.best_match(&elements, input, &percentage)? {
            Some(best) => println!("Best match for \"{input}\": {best}"),
            None => println!("No match for \"{input}\""),
        }
    }

    if let Some(index) = matcher.best_match_index(&elements, "nitrogin", &matches)? {
        println!("Best match index for \"nitrogin\": {index} ({})", elements[index]);
    }

    // Trying an empty candidate list
    let nothing: [&str; 0] = [];
    match matcher.best_match(&nothing, "floreen", &percentage) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Empty list rejected: {e}"),
    }

    // Selectors coming from text are checked at runtime
    match "fuzzy".parse::<Scoring>() {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    println!("\n{} profiles cached", matcher.cache().len());

    Ok(())
}
