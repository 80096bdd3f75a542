use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Expense types
    types.push(clean_type(Category::export_to_string()?));
    types.push(clean_type(ExpenseStatus::export_to_string()?));
    types.push(clean_type(Expense::export_to_string()?));
    types.push(clean_type(CreateExpenseRequest::export_to_string()?));
    types.push(clean_type(UpdateExpenseRequest::export_to_string()?));
    types.push(clean_type(ExpensesResponse::export_to_string()?));
    types.push(clean_type(CategorizeRequest::export_to_string()?));
    types.push(clean_type(CategorizeResponse::export_to_string()?));
    types.push(clean_type(SuggestTitleRequest::export_to_string()?));
    types.push(clean_type(SuggestTitleResponse::export_to_string()?));

    // Extraction types
    types.push(clean_type(ExtractedRecord::export_to_string()?));
    types.push(clean_type(ValidationReport::export_to_string()?));
    types.push(clean_type(DocumentProcessingResult::export_to_string()?));
    types.push(clean_type(ExtractTextRequest::export_to_string()?));
    types.push(clean_type(ExtractTextResponse::export_to_string()?));
    types.push(clean_type(ProcessFileResponse::export_to_string()?));

    // Summary types
    types.push(clean_type(ExpenseSummary::export_to_string()?));
    types.push(clean_type(CategoryBreakdown::export_to_string()?));
    types.push(clean_type(MonthlyTotal::export_to_string()?));
    types.push(clean_type(SummaryResponse::export_to_string()?));
    types.push(clean_type(ExpenseStats::export_to_string()?));
    types.push(clean_type(CategoryStat::export_to_string()?));

    // User types
    types.push(clean_type(User::export_to_string()?));
    types.push(clean_type(RegisterRequest::export_to_string()?));
    types.push(clean_type(RegisterResponse::export_to_string()?));
    types.push(clean_type(LoginRequest::export_to_string()?));
    types.push(clean_type(LoginResponse::export_to_string()?));

    // File and team types
    types.push(clean_type(StoredFile::export_to_string()?));
    types.push(clean_type(FilesResponse::export_to_string()?));
    types.push(clean_type(TeamRole::export_to_string()?));
    types.push(clean_type(Team::export_to_string()?));
    types.push(clean_type(CreateTeamRequest::export_to_string()?));
    types.push(clean_type(AddTeamMemberRequest::export_to_string()?));
    types.push(clean_type(TeamsResponse::export_to_string()?));

    let output_dir = Path::new("../web/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Everything lands in one file, so cross-type imports are dropped
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
