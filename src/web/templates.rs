use chrono::{DateTime, Utc};

use crate::{
    config::ReportSettings,
    report::{COLUMN_HEADERS, format_id_date},
    store::{Registration, RegistrationFields},
    web::responses::Notice,
};

const BASE_STYLES: &str = r#"
        :root { color-scheme: light; }
        body { font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; background: linear-gradient(135deg, #eff6ff, #ffffff, #fefce8); color: #0f172a; min-height: 100vh; }
        header { text-align: center; padding: 3rem 1.5rem 1.5rem; }
        header h1 { color: #1e3a8a; font-size: 2.2rem; margin: 0 0 0.75rem; }
        header p { color: #4b5563; max-width: 640px; margin: 0 auto; }
        main { padding: 1.5rem; max-width: 960px; margin: 0 auto; box-sizing: border-box; }
        .panel { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.75rem; box-shadow: 0 18px 40px rgba(15, 23, 42, 0.08); }
        .panel h2 { margin-top: 0; color: #1e3a8a; }
        label { display: block; margin-top: 1.1rem; font-weight: 600; color: #1e3a8a; }
        input { width: 100%; padding: 0.8rem; margin-top: 0.5rem; border-radius: 8px; border: 1px solid #bfdbfe; background: #f8fafc; font-size: 1rem; box-sizing: border-box; }
        input:focus { outline: none; border-color: #2563eb; box-shadow: 0 0 0 3px rgba(37, 99, 235, 0.15); }
        button { margin-top: 1.5rem; padding: 0.85rem 1.2rem; border: none; border-radius: 8px; background: #ca8a04; color: #ffffff; font-weight: 600; font-size: 1rem; cursor: pointer; }
        button:hover { background: #a16207; }
        button.secondary { background: #ffffff; color: #1d4ed8; border: 1px solid #93c5fd; margin-top: 0; }
        button.danger { background: #ffffff; color: #b91c1c; border: 1px solid #fca5a5; margin-top: 0; }
        .full { width: 100%; }
        .toolbar { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 0.75rem; margin-bottom: 1.5rem; }
        .toolbar form { margin: 0; }
        .actions { display: flex; gap: 0.5rem; flex-wrap: wrap; }
        .actions a { display: inline-flex; align-items: center; padding: 0.55rem 1rem; border-radius: 8px; background: #1e40af; color: #ffffff; text-decoration: none; font-weight: 600; }
        .link { color: #1d4ed8; font-weight: 600; text-decoration: none; }
        .notice { margin-bottom: 1.25rem; padding: 1rem 1.25rem; border-radius: 12px; }
        .notice strong { display: block; margin-bottom: 0.25rem; }
        .notice.success { background: #dcfce7; color: #166534; }
        .notice.error { background: #fee2e2; color: #b91c1c; }
        table { width: 100%; border-collapse: collapse; background: #ffffff; }
        th, td { padding: 0.7rem 0.9rem; border-bottom: 1px solid #e2e8f0; text-align: left; }
        th { background: #eff6ff; color: #1e3a8a; font-weight: 600; }
        td.handle { color: #db2777; font-weight: 600; }
        .empty { text-align: center; color: #6b7280; padding: 2.5rem 0; }
        .meta { color: #64748b; font-size: 0.9rem; }
        .app-footer { margin-top: 3rem; padding: 2rem 0; text-align: center; color: #1d4ed8; border-top: 1px solid #bfdbfe; }
        @media (max-width: 768px) {
            header h1 { font-size: 1.7rem; }
            th, td { padding: 0.5rem; font-size: 0.9rem; }
        }
"#;

fn render_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
{styles}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        styles = BASE_STYLES,
        body = body,
    )
}

pub fn render_notice(notice: Option<&Notice>) -> String {
    let Some(notice) = notice else {
        return String::new();
    };
    let class = if notice.is_error() { "error" } else { "success" };
    format!(
        r#"<div class="notice {class}" role="status"><strong>{title}</strong>{description}</div>"#,
        class = class,
        title = escape_html(notice.title),
        description = escape_html(notice.description),
    )
}

pub fn render_registration_page(form: &RegistrationFields, notice: Option<&Notice>) -> String {
    let inputs = [
        ("nama", "Nama Lengkap", "text", "Masukkan nama lengkap Anda", &form.nama),
        ("sekolah", "Sekolah", "text", "Masukkan nama sekolah Anda", &form.sekolah),
        ("instagram", "Instagram", "text", "@username_instagram", &form.instagram),
        ("no_hp", "Nomor HP", "tel", "Masukkan nomor HP Anda", &form.no_hp),
    ]
    .iter()
    .map(|(name, label, kind, placeholder, value)| {
        format!(
            r#"                <label for="{name}">{label}</label>
                <input id="{name}" name="{name}" type="{kind}" placeholder="{placeholder}" value="{value}" required>"#,
            value = escape_html(value),
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    let body = format!(
        r#"    <header>
        <h1>Formulir Registrasi KKR</h1>
        <p>Kebaktian Kebangunan Rohani - Bergabunglah dengan kami dalam ibadah yang penuh berkat</p>
    </header>
    <main>
        {notice}
        <section class="panel">
            <h2>Daftar Sekarang</h2>
            <p class="meta">Isi formulir di bawah ini untuk mendaftar acara KKR</p>
            <form method="post" action="/register">
{inputs}
                <button type="submit" class="full">Daftar Sekarang</button>
            </form>
        </section>
        <p style="text-align:center; margin-top:2rem;"><a class="link" href="/admin">Akses Admin</a></p>
        {footer}
    </main>"#,
        notice = render_notice(notice),
        inputs = inputs,
        footer = render_footer("Tuhan memberkati acara KKR ini"),
    );

    render_document("Formulir Registrasi KKR", &body)
}

pub fn render_admin_login_page(notice: Option<&Notice>) -> String {
    let body = format!(
        r#"    <header>
        <h1>Admin Login</h1>
        <p>Masukkan password untuk mengakses data registrasi</p>
    </header>
    <main style="max-width:480px;">
        {notice}
        <section class="panel">
            <form method="post" action="/admin/login">
                <label for="password">Password Admin</label>
                <input id="password" type="password" name="password" placeholder="Masukkan password admin" required>
                <button type="submit" class="full">Login</button>
            </form>
        </section>
        <p style="text-align:center; margin-top:1.5rem;"><a class="link" href="/">Kembali ke Formulir</a></p>
    </main>"#,
        notice = render_notice(notice),
    );

    render_document("Admin Login - KKR", &body)
}

pub fn render_admin_panel(
    records: &[Registration],
    loaded_at: Option<DateTime<Utc>>,
    notice: Option<&Notice>,
    settings: &ReportSettings,
) -> String {
    let header_cells = std::iter::once("No")
        .chain(COLUMN_HEADERS)
        .map(|label| format!("<th>{label}</th>"))
        .collect::<String>();

    let listing = if records.is_empty() {
        r#"<p class="empty">Belum ada registrasi</p>"#.to_string()
    } else {
        let rows = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                format!(
                    "<tr><td>{no}</td><td>{nama}</td><td>{sekolah}</td><td class=\"handle\">{instagram}</td><td>{no_hp}</td><td>{tanggal}</td></tr>",
                    no = idx + 1,
                    nama = escape_html(&record.fields.nama),
                    sekolah = escape_html(&record.fields.sekolah),
                    instagram = escape_html(&record.fields.instagram),
                    no_hp = escape_html(&record.fields.no_hp),
                    tanggal = format_id_date(&record.created, &settings.utc_offset),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<table><thead><tr>{header_cells}</tr></thead><tbody>\n{rows}\n</tbody></table>")
    };

    let loaded_note = loaded_at
        .map(|at| {
            format!(
                r#"<p class="meta">Terakhir dimuat: {} {}</p>"#,
                format_id_date(&at, &settings.utc_offset),
                at.with_timezone(&settings.utc_offset).format("%H:%M"),
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"    <header>
        <h1>Panel Admin KKR</h1>
        <p>Kelola dan export data registrasi peserta Kebaktian Kebangunan Rohani</p>
    </header>
    <main>
        {notice}
        <div class="toolbar">
            <a class="link" href="/">Kembali ke Formulir</a>
            <form method="post" action="/admin/logout"><button type="submit" class="danger">Logout</button></form>
        </div>
        <section class="panel">
            <div class="toolbar">
                <div>
                    <h2>Data Registrasi</h2>
                    <p class="meta">Total registrasi: {total} orang</p>
                    {loaded_note}
                </div>
                <div class="actions">
                    <a href="/admin/export/pdf">PDF</a>
                    <a href="/admin/export/xlsx">Excel</a>
                    <form method="post" action="/admin/refresh"><button type="submit" class="secondary">Refresh</button></form>
                </div>
            </div>
            {listing}
        </section>
        {footer}
    </main>"#,
        notice = render_notice(notice),
        total = records.len(),
        loaded_note = loaded_note,
        listing = listing,
        footer = render_footer("Panel Admin - Tuhan memberkati pelayanan ini"),
    );

    render_document("Panel Admin KKR", &body)
}

pub fn render_footer(blessing: &str) -> String {
    format!(
        r#"<footer class="app-footer">{}</footer>"#,
        escape_html(blessing)
    )
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
