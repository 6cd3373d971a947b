//! Remote sheet loading with per-section fallback.
//!
//! Each section fetches its own published CSV export. Any failure (network
//! error, non-2xx status, an HTML error page instead of CSV, a sheet with no
//! usable rows) is logged and the section keeps serving its fallback table.
//! Sections never wait on each other and never share state.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};
use url::Url;

use sheetsite_sections::{
    AchievementsSection, AgendaSection, AgendaItem, BiographyBlock, BiographySection, HeroSection,
    HeroSlide, Initiative, InitiativesSection, LawsSection, LegislativeAchievements, Mapped,
    Profile, ProfileSection, ProjectsSection, RegionalAchievements, SectionMapper,
    UpcomingProject, map_document,
};
use sheetsite_shared::{
    AppConfig, Provenance, Result, SectionKind, SectionState, SheetsiteError, SourcesConfig,
};

/// Maximum number of redirects to follow when fetching a sheet.
const MAX_REDIRECTS: usize = 5;

/// Maximum response size we consider a plausible sheet export (5 MB).
const MAX_RESPONSE_SIZE: u64 = 5 * 1024 * 1024;

/// User-Agent string for sheet requests.
const USER_AGENT: &str = concat!("sheetsite/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// SiteContent
// ---------------------------------------------------------------------------

/// Every section of the site, each live or on fallback independently.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContent {
    pub hero: SectionState<Vec<HeroSlide>>,
    pub biography: SectionState<BiographyBlock>,
    pub laws: SectionState<LegislativeAchievements>,
    pub achievements: SectionState<RegionalAchievements>,
    pub initiatives: SectionState<Initiative>,
    pub agenda: SectionState<AgendaItem>,
    pub projects: SectionState<Vec<UpcomingProject>>,
    pub profile: SectionState<Profile>,
}

impl SiteContent {
    /// Site content before any fetch has settled.
    pub fn fallback() -> Self {
        Self {
            hero: initial::<HeroSection>(),
            biography: initial::<BiographySection>(),
            laws: initial::<LawsSection>(),
            achievements: initial::<AchievementsSection>(),
            initiatives: initial::<InitiativesSection>(),
            agenda: initial::<AgendaSection>(),
            projects: initial::<ProjectsSection>(),
            profile: initial::<ProfileSection>(),
        }
    }

    /// Number of sections serving live data.
    pub fn live_count(&self) -> usize {
        [
            &self.hero.provenance,
            &self.biography.provenance,
            &self.laws.provenance,
            &self.achievements.provenance,
            &self.initiatives.provenance,
            &self.agenda.provenance,
            &self.projects.provenance,
            &self.profile.provenance,
        ]
        .into_iter()
        .filter(|p| p.is_live())
        .count()
    }
}

fn initial<S: SectionMapper>() -> SectionState<S::Content> {
    SectionState::fallback(S::KIND, S::fallback(), "not loaded")
}

// ---------------------------------------------------------------------------
// SheetLoader
// ---------------------------------------------------------------------------

/// Fetches section sheets and maps them onto content.
#[derive(Debug, Clone)]
pub struct SheetLoader {
    client: Client,
    sources: SourcesConfig,
}

impl SheetLoader {
    /// Create a loader from the application config.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.http.timeout_secs)?,
            sources: config.sources.clone(),
        })
    }

    /// Load one section. Never fails: any problem yields fallback content.
    #[instrument(skip_all, fields(section = %S::KIND))]
    pub async fn load<S: SectionMapper>(&self) -> SectionState<S::Content> {
        let url = match self.sources.url_for(S::KIND) {
            Ok(Some(url)) => url,
            Ok(None) => {
                debug!("no sheet published for section");
                return SectionState::fallback(S::KIND, S::fallback(), "no sheet configured");
            }
            Err(e) => {
                warn!(error = %e, "keeping fallback content");
                return SectionState::fallback(S::KIND, S::fallback(), e.to_string());
            }
        };

        match fetch_csv(&self.client, &url).await {
            Ok(body) => state_from_body::<S>(&body),
            Err(e) => {
                warn!(%url, error = %e, "sheet fetch failed, keeping fallback content");
                SectionState::fallback(S::KIND, S::fallback(), e.to_string())
            }
        }
    }

    /// Load every section concurrently.
    #[instrument(skip_all)]
    pub async fn load_site(&self) -> SiteContent {
        let (hero, biography, laws, achievements, initiatives, agenda, projects, profile) = tokio::join!(
            self.load::<HeroSection>(),
            self.load::<BiographySection>(),
            self.load::<LawsSection>(),
            self.load::<AchievementsSection>(),
            self.load::<InitiativesSection>(),
            self.load::<AgendaSection>(),
            self.load::<ProjectsSection>(),
            self.load::<ProfileSection>(),
        );

        let site = SiteContent {
            hero,
            biography,
            laws,
            achievements,
            initiatives,
            agenda,
            projects,
            profile,
        };
        info!(live = site.live_count(), total = SectionKind::ALL.len(), "site content loaded");
        site
    }

    /// Load one section chosen at runtime, as JSON.
    pub async fn load_kind(&self, kind: SectionKind) -> Result<serde_json::Value> {
        match kind {
            SectionKind::Hero => to_json(&self.load::<HeroSection>().await),
            SectionKind::Biography => to_json(&self.load::<BiographySection>().await),
            SectionKind::Profile => to_json(&self.load::<ProfileSection>().await),
            SectionKind::Laws => to_json(&self.load::<LawsSection>().await),
            SectionKind::Achievements => to_json(&self.load::<AchievementsSection>().await),
            SectionKind::Initiatives => to_json(&self.load::<InitiativesSection>().await),
            SectionKind::Agenda => to_json(&self.load::<AgendaSection>().await),
            SectionKind::Projects => to_json(&self.load::<ProjectsSection>().await),
        }
    }
}

/// Map a CSV body already in hand (e.g. a local export) for a section chosen
/// at runtime, as JSON.
pub fn map_kind(kind: SectionKind, body: &str) -> Result<serde_json::Value> {
    match kind {
        SectionKind::Hero => to_json(&state_from_body::<HeroSection>(body)),
        SectionKind::Biography => to_json(&state_from_body::<BiographySection>(body)),
        SectionKind::Profile => to_json(&state_from_body::<ProfileSection>(body)),
        SectionKind::Laws => to_json(&state_from_body::<LawsSection>(body)),
        SectionKind::Achievements => to_json(&state_from_body::<AchievementsSection>(body)),
        SectionKind::Initiatives => to_json(&state_from_body::<InitiativesSection>(body)),
        SectionKind::Agenda => to_json(&state_from_body::<AgendaSection>(body)),
        SectionKind::Projects => to_json(&state_from_body::<ProjectsSection>(body)),
    }
}

/// Map a CSV body onto section `S`, recording provenance.
pub fn state_from_body<S: SectionMapper>(body: &str) -> SectionState<S::Content> {
    match map_document::<S>(body) {
        Mapped::Live { content, rows } => {
            info!(section = %S::KIND, rows, "live sheet content applied");
            SectionState {
                kind: S::KIND,
                provenance: Provenance::Live {
                    fetched_at: Utc::now(),
                    content_hash: content_hash(body),
                    rows,
                },
                content,
            }
        }
        Mapped::Unusable { reason } => {
            warn!(section = %S::KIND, %reason, "sheet unusable, keeping fallback content");
            SectionState::fallback(S::KIND, S::fallback(), reason)
        }
    }
}

fn to_json<T: Serialize>(state: &T) -> Result<serde_json::Value> {
    serde_json::to_value(state)
        .map_err(|e| SheetsiteError::parse(format!("failed to serialize section: {e}")))
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| SheetsiteError::Network(format!("failed to build HTTP client: {e}")))
}

/// Fetch a sheet export, rejecting anything that is clearly not CSV.
pub async fn fetch_csv(client: &Client, url: &Url) -> Result<String> {
    let mut response = client
        .get(url.clone())
        .header(CACHE_CONTROL, "no-store")
        .header(ACCEPT, "text/csv")
        .send()
        .await
        .map_err(|e| SheetsiteError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SheetsiteError::Network(format!("{url}: HTTP {status}")));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(too_large(url, len));
        }
    }

    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"));

    // Chunked responses carry no Content-Length, so the cap is enforced while reading.
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SheetsiteError::Network(format!("{url}: failed to read body: {e}")))?
    {
        let total = (bytes.len() + chunk.len()) as u64;
        if total > MAX_RESPONSE_SIZE {
            return Err(too_large(url, total));
        }
        bytes.extend_from_slice(&chunk);
    }

    let body = String::from_utf8(bytes)
        .map_err(|e| SheetsiteError::parse(format!("{url}: body is not UTF-8: {e}")))?;

    // Unpublished or login-walled sheets answer 200 with an HTML page.
    if is_html || body.trim_start().starts_with('<') {
        return Err(SheetsiteError::parse(format!("{url}: got an HTML page instead of CSV")));
    }

    Ok(body)
}

fn too_large(url: &Url, len: u64) -> SheetsiteError {
    SheetsiteError::validation(format!(
        "{url}: response too large (at least {len} bytes, max {MAX_RESPONSE_SIZE})"
    ))
}

/// SHA-256 of a sheet body, hex-encoded.
pub fn content_hash(body: &str) -> String {
    let digest = Sha256::digest(body.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> AppConfig {
        let mut config = AppConfig::default();
        for kind in SectionKind::ALL {
            config.sources.set(kind, format!("{}/{kind}.csv", server.uri()));
        }
        config.http.timeout_secs = 5;
        config
    }

    async fn serve_csv(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/csv; charset=utf-8")
                    .set_body_string(body),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn content_hash_is_hex_sha256() {
        let hash = content_hash("id,img\n");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, content_hash("id,img\n"));
    }

    #[test]
    fn local_body_maps_with_live_provenance() {
        let state = state_from_body::<HeroSection>("id,img\n1,https://x/a.webp\n");
        assert!(state.provenance.is_live());
        assert_eq!(state.content.len(), 1);

        let json = map_kind(SectionKind::Hero, "id,img\n").unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["content"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn json_carries_render_attributes() {
        let json = map_kind(
            SectionKind::Hero,
            "id,img,link\n1,https://x/a.webp,https://site/promo\n2,https://x/b.webp,#buzon\n",
        )
        .unwrap();
        let slides = json["content"].as_array().unwrap();
        assert_eq!(slides[0]["link"]["target"], "new-tab");
        assert_eq!(slides[0]["link"]["rel"], "noopener noreferrer");
        assert!(slides[1]["link"].get("rel").is_none());

        let json = map_kind(SectionKind::Projects, "id,titulo,categoria,estado\n4,Malecón,,Próximamente\n")
            .unwrap();
        assert_eq!(json["content"][0]["status"], "coming-soon");
        assert_eq!(json["content"][0]["status_label"], "PRÓXIMAMENTE");
    }

    #[tokio::test]
    async fn live_sheet_replaces_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/hero.csv"))
            .and(header("cache-control", "no-store"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "id,img,link\n1,https://x/a.webp,\n2,https://x/b.webp,https://site/promo\n",
            ))
            .mount(&server)
            .await;

        let loader = SheetLoader::new(&config_for(&server)).unwrap();
        let state = loader.load::<HeroSection>().await;

        match &state.provenance {
            Provenance::Live { rows, content_hash, .. } => {
                assert_eq!(*rows, 2);
                assert_eq!(content_hash.len(), 64);
            }
            other => panic!("expected live provenance, got {other:?}"),
        }
        assert_eq!(state.content.len(), 2);
        assert_eq!(
            state.content[1].link.as_ref().map(|l| l.href.as_str()),
            Some("https://site/promo")
        );
    }

    #[tokio::test]
    async fn http_error_keeps_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/agenda.csv"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let loader = SheetLoader::new(&config_for(&server)).unwrap();
        let state = loader.load::<AgendaSection>().await;

        assert_eq!(state.content, AgendaSection::fallback());
        match state.provenance {
            Provenance::Fallback { reason } => assert!(reason.contains("500")),
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_page_keeps_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/laws.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("id,title\n1,looks like csv\n"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/agenda.csv"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<!DOCTYPE html><html></html>"),
            )
            .mount(&server)
            .await;

        let loader = SheetLoader::new(&config_for(&server)).unwrap();

        let laws = loader.load::<LawsSection>().await;
        assert!(!laws.provenance.is_live());
        assert_eq!(laws.content, LawsSection::fallback());

        let agenda = loader.load::<AgendaSection>().await;
        assert!(!agenda.provenance.is_live());
    }

    #[tokio::test]
    async fn header_only_sheet_keeps_fallback() {
        let server = MockServer::start().await;
        serve_csv(&server, "/initiatives.csv", "id,sectionTitle,description\r\n").await;

        let loader = SheetLoader::new(&config_for(&server)).unwrap();
        let state = loader.load::<InitiativesSection>().await;

        assert!(!state.provenance.is_live());
        assert_eq!(state.content, InitiativesSection::fallback());
    }

    #[tokio::test]
    async fn unpublished_section_skips_network() {
        let mut config = AppConfig::default();
        config.sources.set(SectionKind::Projects, "");

        let loader = SheetLoader::new(&config).unwrap();
        let state = loader.load::<ProjectsSection>().await;

        assert_eq!(state.content.len(), 3);
        assert_eq!(state.provenance, Provenance::fallback("no sheet configured"));
    }

    #[tokio::test]
    async fn sections_load_independently() {
        let server = MockServer::start().await;

        serve_csv(
            &server,
            "/profile.csv",
            "section,key,title,description\nHERO,QUOTE,,Una frase inspiradora\n",
        )
        .await;
        serve_csv(
            &server,
            "/biography.csv",
            "key,value\ntitle,HOLA MANABÍ\n",
        )
        .await;
        // Every other route 404s.

        let loader = SheetLoader::new(&config_for(&server)).unwrap();
        let site = loader.load_site().await;

        assert_eq!(site.live_count(), 2);
        assert_eq!(site.profile.content.hero.quote, "Una frase inspiradora");
        assert_eq!(site.biography.content.title, "HOLA MANABÍ");
        assert_eq!(site.hero.content, HeroSection::fallback());

        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json["profile"]["source"], "live");
        assert_eq!(json["hero"]["source"], "fallback");
    }

    #[tokio::test]
    async fn load_kind_serializes_state() {
        let server = MockServer::start().await;
        serve_csv(&server, "/agenda.csv", "id,title\n5,AGENDA 2026\n").await;

        let loader = SheetLoader::new(&config_for(&server)).unwrap();
        let json = loader.load_kind(SectionKind::Agenda).await.unwrap();

        assert_eq!(json["kind"], "agenda");
        assert_eq!(json["content"]["title"], "AGENDA 2026");
        assert_eq!(json["content"]["id"], "5");
    }

    #[test]
    fn fallback_site_is_fully_renderable() {
        let site = SiteContent::fallback();
        assert_eq!(site.live_count(), 0);
        assert!(!site.hero.content.is_empty());
        assert!(!site.laws.content.items.is_empty());
    }

    /// Serve one chunked response (no Content-Length) of at least `total` body bytes.
    async fn serve_chunked(total: usize) -> Url {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let head = "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
            if socket.write_all(head.as_bytes()).await.is_err() {
                return;
            }

            let row = "1,https://x/a.webp,https://site/promo\n";
            let chunk = row.repeat(64 * 1024 / row.len());
            let mut sent = 0;
            while sent < total {
                let frame = format!("{:x}\r\n{chunk}\r\n", chunk.len());
                // The client hangs up once it has seen enough.
                if socket.write_all(frame.as_bytes()).await.is_err() {
                    return;
                }
                sent += chunk.len();
            }
            let _ = socket.write_all(b"0\r\n\r\n").await;
        });

        Url::parse(&format!("http://{addr}/hero.csv")).unwrap()
    }

    #[tokio::test]
    async fn chunked_body_over_cap_is_rejected() {
        let url = serve_chunked(MAX_RESPONSE_SIZE as usize + 1024 * 1024).await;
        let client = build_client(5).unwrap();

        let err = fetch_csv(&client, &url).await.unwrap_err();
        assert!(matches!(err, SheetsiteError::Validation { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[tokio::test]
    async fn chunked_body_under_cap_is_read_whole() {
        let url = serve_chunked(200 * 1024).await;
        let client = build_client(5).unwrap();

        let body = fetch_csv(&client, &url).await.unwrap();
        assert!(body.len() >= 200 * 1024);
        assert!(body.starts_with("1,https://x/a.webp"));
    }

    #[tokio::test]
    async fn oversized_content_length_keeps_fallback() {
        let server = MockServer::start().await;
        let body = "a".repeat(MAX_RESPONSE_SIZE as usize + 1);
        serve_csv(&server, "/hero.csv", &body).await;

        let loader = SheetLoader::new(&config_for(&server)).unwrap();
        let state = loader.load::<HeroSection>().await;

        assert_eq!(state.content, HeroSection::fallback());
        match state.provenance {
            Provenance::Fallback { reason } => assert!(reason.contains("too large")),
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_sheet_times_out_to_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/agenda.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("id,title\n5,AGENDA 2026\n")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.http.timeout_secs = 1;
        let loader = SheetLoader::new(&config).unwrap();
        let state = loader.load::<AgendaSection>().await;

        assert!(matches!(state.provenance, Provenance::Fallback { .. }));
        assert_eq!(state.content, AgendaSection::fallback());
    }
}
