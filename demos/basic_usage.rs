use searchserver::{DocumentStatus, SearchServer};

fn main() -> anyhow::Result<()> {
    println!("=== Search Server Basic Usage Example ===\n");

    let mut server = SearchServer::with_stop_words("and in on with");

    println!("Adding documents...");
    server.add_document(0, "white cat and fancy collar", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "groomed starling eugene", DocumentStatus::Banned, &[9])?;
    println!("✓ Added {} documents\n", server.document_count());

    // Example 1: default search over actual documents
    println!("--- Example 1: Search for 'fluffy groomed cat' ---");
    for document in server.find_top_documents("fluffy groomed cat")? {
        println!("{}", document);
    }

    // Example 2: minus words
    println!("\n--- Example 2: Search for 'fluffy groomed cat -tail' ---");
    for document in server.find_top_documents("fluffy groomed cat -tail")? {
        println!("{}", document);
    }

    // Example 3: status filter
    println!("\n--- Example 3: Banned documents only ---");
    let banned =
        server.find_top_documents_with_status("fluffy groomed cat", DocumentStatus::Banned)?;
    for document in banned {
        println!("{}", document);
    }

    // Example 4: custom predicate
    println!("\n--- Example 4: Even ids only ---");
    for document in server.find_top_documents_by("fluffy groomed cat", |id, _, _| id % 2 == 0)? {
        println!("{}", document);
    }

    // Example 5: matching
    println!("\n--- Example 5: Match 'fluffy cat -collar' against every document ---");
    let ids: Vec<_> = server.document_ids().collect();
    for id in ids {
        let matched = server.match_document("fluffy cat -collar", id)?;
        println!("  {} [{}]: {:?}", id, matched.status, matched.words);
    }

    // Example 6: malformed query
    println!("\n--- Example 6: Malformed query ---");
    if let Err(err) = server.find_top_documents("cat -") {
        println!("  rejected: {}", err);
    }

    // Example 7: statistics
    println!("\n--- Example 7: Index Statistics ---");
    let stats = server.stats();
    println!("Total documents: {}", stats.total_documents);
    println!("Total unique terms: {}", stats.total_terms);
    println!("Average docs per term: {:.2}", stats.avg_docs_per_term);

    println!("\n=== Example Complete ===");

    Ok(())
}
