use swag_core::GeneratedFile;

pub const HTTP_REQUEST_FILE: &str = "httpRequest.ts";
pub const CONFIG_FILE: &str = "config.ts";

/// Runtime files the request functions import. `httpRequest.ts` is replaced
/// on every run; `config.ts` belongs to the user once written.
pub fn emit_scaffold() -> Vec<GeneratedFile> {
    vec![
        GeneratedFile {
            path: HTTP_REQUEST_FILE.to_string(),
            content: include_str!("../../templates/httpRequest.ts").to_string(),
            overwrite: true,
        },
        GeneratedFile {
            path: CONFIG_FILE.to_string(),
            content: include_str!("../../templates/config.ts").to_string(),
            overwrite: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_files() {
        let files = emit_scaffold();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "httpRequest.ts");
        assert!(files[0].overwrite);
        assert!(files[0].content.contains("export function overrideConfig"));
        assert!(files[0].content.contains("export function objToForm"));
        assert_eq!(files[1].path, "config.ts");
        assert!(!files[1].overwrite);
        assert!(files[1].content.contains("export function getAxiosInstance"));
    }
}
