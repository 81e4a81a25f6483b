// src/ports/html.rs
use crate::application::agenda::{AgendaMode, AgendaPage, ScrollTarget, Side, TimelineCard};
use crate::application::lesson_form::{FieldEditor, LessonFormPage};
use crate::application::router::NavLink;
use crate::application::session::UsageIndicator;
use crate::application::sidebar::SidebarView;
use crate::domain::Category;
use crate::ports::page::{Page, MAIN_CONTENT, NAVBAR, SIDEBAR};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;
use tracing::instrument;

/// Turns view descriptions into markup.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_home(&self, greeting: &str, user_name: &str) -> String {
        format!(
            r#"<h1 class="text-4xl font-bold text-gray-800 mb-4">{} {}</h1>"#,
            text(greeting),
            text(user_name)
        )
    }

    pub fn render_not_found(&self) -> String {
        r##"<div class="flex flex-col items-center justify-center h-full text-center text-red-600">
    <h1 class="text-4xl font-bold mb-4">404 - 页面未找到</h1>
    <p class="text-xl">您访问的页面不存在。</p>
    <a href="#/" class="mt-4 px-6 py-3 bg-blue-500 text-white rounded">返回首页</a>
</div>"##
            .to_string()
    }

    pub fn render_navbar(
        &self,
        links: &[NavLink],
        clock: &str,
        usage: &UsageIndicator,
        sidebar_open: bool,
    ) -> String {
        let mut html = format!(
            r#"<nav class="navbar"><button class="menu-toggle{}">☰</button>"#,
            active_class(sidebar_open)
        );
        for link in links {
            let _ = write!(
                html,
                r#"<a href="{}" class="navbar-link{}">{}</a>"#,
                attr(&link.href),
                if link.active { " active" } else { "" },
                text(link.title)
            );
        }
        let width = usage
            .width_px()
            .map_or_else(|| "auto".to_string(), |w| format!("{w}px"));
        let _ = write!(
            html,
            r#"<span id="current-time">{}</span><span id="usage-time" style="width: {}">{}</span></nav>"#,
            text(clock),
            width,
            usage_spans(usage)
        );
        html
    }

    pub fn render_sidebar(&self, links: &[NavLink], lessons: &SidebarView) -> String {
        let mut html = format!(
            r#"<aside class="sidebar{}"><ul class="sidebar-menu">"#,
            active_class(lessons.open)
        );

        let _ = write!(
            html,
            r#"<li class="menu-item"><div class="menu-header"><span class="menu-title{}" data-target="prepared-lessons-list">备课</span></div><ul id="prepared-lessons-list" class="sub-menu{}">"#,
            if lessons.expanded { " expanded" } else { "" },
            if lessons.expanded { " show" } else { "" }
        );
        if lessons.entries.is_empty() {
            html.push_str(r#"<li class="no-lesson-item">暂无已备课程</li>"#);
        }
        for entry in &lessons.entries {
            let _ = write!(
                html,
                r#"<li class="prepared-lesson-item" data-lesson-id="{id}" title="{hover}"><a class="lesson-item-content" href="{href}">{label}</a><span class="delete-lesson-btn" title="删除此课程">···</span></li>"#,
                id = attr(&entry.id),
                hover = attr(&entry.hover),
                href = attr(&entry.href),
                label = text(&entry.label)
            );
        }
        html.push_str("</ul></li>");

        for link in links {
            let _ = write!(
                html,
                r#"<li class="menu-item"><a href="{}"{}>{}</a></li>"#,
                attr(&link.href),
                if link.active { r#" class="active""# } else { "" },
                text(link.title)
            );
        }
        html.push_str("</ul></aside>");
        html
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render_agenda(&self, page: &AgendaPage) -> String {
        let hidden = |visible: bool| if visible { "" } else { " hidden" };
        let timeline_visible = page.mode == AgendaMode::Timeline;

        let mut html = String::from(r#"<div class="flex flex-grow p-6"><div class="w-1/4 pr-6 space-y-4">"#);
        for (title, id, items) in [
            ("我的笔记", "notes-list", &page.lists.all),
            ("待办事项", "todos-list", &page.lists.todos),
            ("课程提醒", "courses-list", &page.lists.courses),
        ] {
            let _ = write!(
                html,
                r#"<div><button class="w-full p-4 text-left font-semibold text-gray-800">{title}</button><div class="p-4"><ul id="{id}" class="space-y-2 text-gray-800">"#
            );
            for item in items {
                let _ = write!(html, r#"<li class="text-sm text-gray-800">{}</li>"#, text(item));
            }
            html.push_str("</ul></div></div>");
        }
        html.push_str("</div>");

        html.push_str(r#"<div class="w-3/4 bg-white rounded-lg shadow-md p-6 relative"><div class="absolute top-4 right-4 flex space-x-2"><button id="add-btn" class="leaf-btn">+</button><button id="calendar-btn">📅</button></div>"#);

        let scroll = match page.timeline.scroll {
            ScrollTarget::Top => "top".to_string(),
            ScrollTarget::Card(i) => format!("note-card-{i}"),
        };
        let _ = write!(
            html,
            r#"<div id="timeline-view" class="{}"><div id="timeline" class="timeline" style="height: {}px" data-scroll-to="{}">"#,
            hidden(timeline_visible).trim(),
            page.timeline.height_px,
            scroll
        );
        for card in &page.timeline.cards {
            html.push_str(&timeline_card(card));
        }
        html.push_str("</div></div>");

        let _ = write!(
            html,
            r#"<div id="calendar-view" class="{}"><div id="calendar" class="grid grid-cols-7 gap-2">"#,
            hidden(!timeline_visible).trim()
        );
        if let Some(calendar) = &page.calendar {
            for cell in &calendar.cells {
                let _ = write!(
                    html,
                    r#"<div class="p-2 border rounded text-center cursor-pointer {}" data-date="{}">{}</div>"#,
                    if cell.has_activity { "bg-green-200" } else { "bg-white" },
                    attr(&cell.date),
                    cell.day
                );
            }
        }
        html.push_str("</div></div></div></div>");

        let _ = write!(
            html,
            r#"<div id="modal" class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center{}"><div class="bg-white rounded-lg p-6 w-96 modal"><h3 class="text-lg font-bold mb-4 text-gray-800">添加新记录</h3><textarea id="note-input" class="w-full p-2 border rounded mb-4" placeholder="输入内容..." rows="4"></textarea><input id="note-tag" class="w-full p-2 border rounded mb-4" placeholder="输入标签（可选）"><div class="flex justify-end space-x-2"><button id="cancel-btn">取消</button><button id="save-btn">保存</button></div></div></div>"#,
            hidden(page.modal_open)
        );
        html
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render_lesson_form(&self, page: &LessonFormPage) -> String {
        let mut html = format!(
            r#"<main class="prepare-lesson-main"><h1>{}</h1><div class="lesson-cards-grid">"#,
            text(&page.title)
        );
        for card in &page.cards {
            let _ = write!(
                html,
                r#"<div class="lesson-card" data-field="{}"><h2>{}</h2><p class="card-content-display">{}</p></div>"#,
                card.field.key(),
                card.field.title(),
                text(&card.value)
            );
        }

        html.push_str(r#"<div class="lesson-card file-upload-card" data-field="fileUpload"><h2>文件上传</h2><div class="upload-area"><input type="file" multiple class="file-input" accept=".pdf,.jpg,.png,.docx,.mp4,.mp3,.html"><p>拖拽文件到此区域或点击上传</p><p class="upload-formats">支持格式：PDF、JPG、PNG、DOCX、MP4、MP3、HTML</p></div><div class="uploaded-files">"#);
        if page.files.is_empty() {
            html.push_str(r#"<p class="no-files">暂无文件</p>"#);
        }
        for file in &page.files {
            let _ = write!(
                html,
                r#"<div class="uploaded-file-item"><span>{}</span><button class="delete-file-btn" data-index="{}">&times;</button></div>"#,
                text(&file.name),
                file.index
            );
        }
        html.push_str(r#"</div></div></div><button class="save-lesson-btn">保存课程</button></main>"#);

        match &page.editor {
            Some((field, editor)) => {
                let _ = write!(
                    html,
                    r#"<div id="lessonModal" class="modal" style="display: block"><div class="modal-content"><span class="close-button">&times;</span><h3 id="modalTitle">{}</h3><div class="modal-body" data-field="{}">{}</div><div class="modal-footer"><button id="modalSaveBtn">确定</button></div></div></div>"#,
                    field.title(),
                    field.key(),
                    editor_input(editor)
                );
            }
            None => html.push_str(r#"<div id="lessonModal" class="modal"></div>"#),
        }
        html
    }

    /// Assemble the whole document from the page regions.
    pub fn render_document(&self, page: &Page, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            margin: 0;
            display: grid;
            grid-template-columns: 220px 1fr;
            grid-template-rows: auto 1fr;
            background-color: #f5f5f5;
        }}
        #navbar-container {{ grid-column: 1 / 3; }}
        .navbar-link.active, .sidebar-menu a.active {{ font-weight: bold; color: #2ecc71; }}
        .menu-toggle {{ display: none; }}
        @media (max-width: 768px) {{
            .menu-toggle {{ display: inline-block; }}
            .sidebar {{ display: none; }}
            .sidebar.active {{ display: block; }}
        }}
        .hidden {{ display: none; }}
        .sub-menu {{ display: none; }}
        .sub-menu.show {{ display: block; }}
        .timeline {{ position: relative; }}
        .note-card {{ position: absolute; width: 45%; padding: 0.5rem; border-radius: 6px; }}
        .timeline-dot {{ position: absolute; left: 50%; width: 10px; height: 10px; border-radius: 50%; background: #2ecc71; }}
        .bg-yellow-100 {{ background: #fef9c3; }}
        .bg-blue-100 {{ background: #dbeafe; }}
        .bg-gray-100 {{ background: #f3f4f6; }}
        .bg-green-200 {{ background: #bbf7d0; }}
        .lesson-card {{ background: white; border-radius: 8px; padding: 1rem; margin: 0.5rem; }}
    </style>
</head>
<body>
    <div id="navbar-container">{navbar}</div>
    <div id="sidebar-container">{sidebar}</div>
    <div class="main-content">{main}</div>
</body>
</html>"#,
            title = text(title),
            navbar = page.region(NAVBAR).unwrap_or_default(),
            sidebar = page.region(SIDEBAR).unwrap_or_default(),
            main = page.region(MAIN_CONTENT).unwrap_or_default(),
        )
    }
}

fn category_class(category: Category) -> &'static str {
    match category {
        Category::Todo => "bg-yellow-100",
        Category::Course => "bg-blue-100",
        Category::Note => "bg-gray-100",
    }
}

fn timeline_card(card: &TimelineCard) -> String {
    format!(
        r#"<div id="note-card-{index}" class="note-card {side} {color}" style="top: {top}px"><span class="text-sm text-gray-800">{date}</span><span class="ml-2 text-sm font-bold text-green-500">[{label}]</span><p>{content}</p></div><div class="timeline-dot" style="top: {dot}px"></div>"#,
        index = card.index,
        side = match card.side {
            Side::Left => "left-0",
            Side::Right => "right-0",
        },
        color = category_class(card.category),
        top = card.top_px,
        date = text(&card.date),
        label = text(&card.label),
        content = text(&card.content),
        dot = card.dot_top_px,
    )
}

fn active_class(active: bool) -> &'static str {
    if active {
        " active"
    } else {
        ""
    }
}

fn usage_spans(usage: &UsageIndicator) -> String {
    match usage {
        UsageIndicator::Rest => text(&usage.text()).into_owned(),
        UsageIndicator::Leaves(items) => items
            .iter()
            .flat_map(|item| item.chars())
            .map(|leaf| format!("<span>{leaf}</span>"))
            .collect(),
    }
}

fn editor_input(editor: &FieldEditor) -> String {
    match editor {
        FieldEditor::TextArea { value, rows } => format!(
            r#"<textarea class="modal-input" rows="{rows}">{}</textarea>"#,
            text(value)
        ),
        FieldEditor::DateTime { date, time } => format!(
            r#"<input type="date" id="lesson-date-input" value="{}"><input type="time" id="lesson-time-input" value="{}">"#,
            attr(date),
            attr(time)
        ),
        FieldEditor::Number { value } => format!(
            r#"<input type="number" class="modal-input" value="{}">"#,
            attr(value)
        ),
    }
}
