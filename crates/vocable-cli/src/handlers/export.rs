//! `vocable export`: synthesize through the fallback endpoint and save.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use vocable_core::{
    FallbackError, NoopRecordingHost, NoopSpeechEngine, Settings, TtsRequest, Voice, VoiceSettings,
};
use vocable_speech::{
    AudioCaptureBridge, AudioExporter, DirectorySaver, DownloadHelper, FallbackClient,
};

use crate::commands::ExportArgs;

/// Build the request from arguments, falling back to configured defaults.
///
/// The endpoint resolves voices by name, so the voice carries no language.
/// Out-of-range parameters are clamped.
pub fn build_request(settings: &Settings, args: &ExportArgs, text: String) -> TtsRequest {
    let defaults = VoiceSettings::default();
    let voice_settings = VoiceSettings {
        voice: args
            .voice
            .as_ref()
            .or(settings.default_voice.as_ref())
            .map(|name| Voice::new(name.as_str(), "")),
        rate: args.rate.or(settings.default_rate).unwrap_or(defaults.rate),
        pitch: args.pitch.or(settings.default_pitch).unwrap_or(defaults.pitch),
        volume: args.volume.or(settings.default_volume).unwrap_or(defaults.volume),
    };
    voice_settings.clamped().request(text)
}

/// Directory to save into: argument, then configuration, then the working directory.
pub fn output_dir(settings: &Settings, args: &ExportArgs) -> PathBuf {
    args.out_dir
        .clone()
        .or_else(|| settings.download_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Execute the export command.
pub async fn execute(settings: &Settings, args: ExportArgs) -> Result<()> {
    let text = super::read_text(&args.text)?;
    if text.trim().is_empty() {
        bail!("Nothing to export: text is empty");
    }

    let mut settings = settings.clone();
    if let Some(endpoint) = &args.endpoint {
        settings.fallback_url = Some(endpoint.clone());
    }

    let fallback = match FallbackClient::from_settings(&settings) {
        Ok(client) => Some(client),
        Err(FallbackError::NotConfigured) => None,
        Err(e) => return Err(e.into()),
    };

    // No speech engine off the browser: only the fallback path can succeed.
    let capture = AudioCaptureBridge::new(Arc::new(NoopSpeechEngine), NoopRecordingHost)
        .with_grace_period(settings.effective_capture_grace());
    let exporter = AudioExporter::new(capture, fallback);

    let request = build_request(&settings, &args, text);
    let blob = exporter.export(&request).await.with_context(|| {
        format!(
            "Failed to synthesize speech (set {} or pass --endpoint)",
            crate::config::ENV_FALLBACK_URL
        )
    })?;

    let dir = output_dir(&settings, &args);
    let helper = DownloadHelper::new(DirectorySaver::new(&dir));
    let filename = helper
        .download_audio(&blob, args.filename.as_deref())
        .with_context(|| format!("Failed to save audio into {}", dir.display()))?;

    println!(
        "✓ Saved {} ({} bytes, {})",
        dir.join(filename).display(),
        blob.len(),
        blob.mime()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> ExportArgs {
        ExportArgs {
            text: text.to_string(),
            voice: None,
            rate: None,
            pitch: None,
            volume: None,
            endpoint: None,
            out_dir: None,
            filename: None,
        }
    }

    #[test]
    fn test_arguments_override_settings() {
        let settings = Settings {
            default_voice: Some("Alex".to_string()),
            default_rate: Some(1.5),
            ..Settings::with_defaults()
        };
        let mut export = args("hello");
        export.voice = Some("Amelie".to_string());
        export.volume = Some(0.5);

        let request = build_request(&settings, &export, "hello".to_string());

        assert_eq!(request.voice.map(|v| v.name), Some("Amelie".to_string()));
        assert_eq!(request.rate, Some(1.5));
        assert_eq!(request.pitch, Some(1.0));
        assert_eq!(request.volume, Some(0.5));
    }

    #[test]
    fn test_unset_parameters_use_neutral_defaults() {
        let mut export = args("hello");
        export.rate = Some(42.0);

        let request = build_request(&Settings::default(), &export, "hello".to_string());

        assert!(request.voice.is_none());
        assert_eq!(request.rate, Some(10.0));
        assert_eq!(request.pitch, Some(1.0));
        assert_eq!(request.volume, Some(1.0));
    }

    #[test]
    fn test_output_dir_precedence() {
        let settings = Settings {
            download_dir: Some("/var/speech".to_string()),
            ..Settings::default()
        };
        let mut export = args("hello");
        assert_eq!(output_dir(&settings, &export), PathBuf::from("/var/speech"));

        export.out_dir = Some(PathBuf::from("/tmp/out"));
        assert_eq!(output_dir(&settings, &export), PathBuf::from("/tmp/out"));

        assert_eq!(output_dir(&Settings::default(), &args("x")), PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_export_without_endpoint_fails_cleanly() {
        let temp = tempfile::tempdir().unwrap();
        let mut export = args("hello");
        export.out_dir = Some(temp.path().to_path_buf());

        let err = execute(&Settings::default(), export).await.unwrap_err();

        assert!(format!("{err:#}").contains("No way to export audio"));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        assert!(execute(&Settings::default(), args("  ")).await.is_err());
    }
}
