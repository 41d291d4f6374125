use ts_rs::TS;

/// Every type exported to the web client, in output order
pub const API_TYPE_NAMES: &[&str] = &[
    "ErrorResponse",
    "MessageResponse",
    "ServerStatus",
    "SignupRequest",
    "LoginRequest",
    "UserInfo",
    "LoginResponse",
    "UserResponse",
    "SessionResponse",
    "CreateTranscriptRequest",
    "TranscriptCreated",
    "CreateTranscriptResponse",
    "TranscriptListItem",
    "TranscriptListResponse",
    "SummaryBrief",
    "TranscriptDetail",
    "TranscriptResponse",
    "GenerateSummaryRequest",
    "SummaryCreated",
    "GenerateSummaryResponse",
    "TranscriptRef",
    "SummaryItem",
    "SummaryListResponse",
    "SummaryResponse",
    "UpdateSummaryRequest",
    "ShareSummaryRequest",
    "ShareSummaryResponse",
    "SummaryRef",
    "EmailShareItem",
    "ShareListResponse",
    "DashboardStats",
    "DashboardStatsResponse",
    "PromptPreset",
    "PromptListResponse",
];

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;

    let result = match name {
        "ErrorResponse" => ErrorResponse::export_to_string()?,
        "MessageResponse" => MessageResponse::export_to_string()?,
        "ServerStatus" => ServerStatus::export_to_string()?,

        "SignupRequest" => SignupRequest::export_to_string()?,
        "LoginRequest" => LoginRequest::export_to_string()?,
        "UserInfo" => UserInfo::export_to_string()?,
        "LoginResponse" => LoginResponse::export_to_string()?,
        "UserResponse" => UserResponse::export_to_string()?,
        "SessionResponse" => SessionResponse::export_to_string()?,

        "CreateTranscriptRequest" => CreateTranscriptRequest::export_to_string()?,
        "TranscriptCreated" => TranscriptCreated::export_to_string()?,
        "CreateTranscriptResponse" => CreateTranscriptResponse::export_to_string()?,
        "TranscriptListItem" => TranscriptListItem::export_to_string()?,
        "TranscriptListResponse" => TranscriptListResponse::export_to_string()?,
        "SummaryBrief" => SummaryBrief::export_to_string()?,
        "TranscriptDetail" => TranscriptDetail::export_to_string()?,
        "TranscriptResponse" => TranscriptResponse::export_to_string()?,

        "GenerateSummaryRequest" => GenerateSummaryRequest::export_to_string()?,
        "SummaryCreated" => SummaryCreated::export_to_string()?,
        "GenerateSummaryResponse" => GenerateSummaryResponse::export_to_string()?,
        "TranscriptRef" => TranscriptRef::export_to_string()?,
        "SummaryItem" => SummaryItem::export_to_string()?,
        "SummaryListResponse" => SummaryListResponse::export_to_string()?,
        "SummaryResponse" => SummaryResponse::export_to_string()?,
        "UpdateSummaryRequest" => UpdateSummaryRequest::export_to_string()?,

        "ShareSummaryRequest" => ShareSummaryRequest::export_to_string()?,
        "ShareSummaryResponse" => ShareSummaryResponse::export_to_string()?,
        "SummaryRef" => SummaryRef::export_to_string()?,
        "EmailShareItem" => EmailShareItem::export_to_string()?,
        "ShareListResponse" => ShareListResponse::export_to_string()?,

        "DashboardStats" => DashboardStats::export_to_string()?,
        "DashboardStatsResponse" => DashboardStatsResponse::export_to_string()?,

        "PromptPreset" => PromptPreset::export_to_string()?,
        "PromptListResponse" => PromptListResponse::export_to_string()?,

        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .collect();

    filtered.join("\n").trim().to_string()
}
