/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! static situational hotspot map of Indonesia, rendered into a raster image.
//!
//! All positions of map elements (legend, region count box, title, logo) are given in
//! geographic coordinates and mapped into the plot area with the same scale on both axes.
//! Text is only drawn if we have a font

use std::{fs, path::Path};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use chrono::NaiveDate;
use geo_types::LineString;
use image::{imageops::{self, FilterType}, ImageFormat, Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut,
              draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size},
    point::Point as PxPoint,
    rect::Rect
};
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use odin_common::BoundingBox;
use crate::{
    bmkg::{BmkgHotspot,ConfidenceClass,RegionCounts},
    boundary::BoundaryLayer,
    errors::Result
};

/* #region layout and style ***************************************************************/

/// canvas size and geographic extent of the map
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct MapLayout {
    pub width: u32,  // px
    pub height: u32, // px
    pub dpi: f32,    // used to convert font point sizes
    pub extent: BoundingBox<f64>, // lon/lat degrees
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
}

impl Default for MapLayout {
    fn default()->Self {
        MapLayout {
            width: 1500,   // 10in @ 150dpi
            height: 1125,  // 7.5in @ 150dpi
            dpi: 150.0,
            extent: BoundingBox::new( 95.0, -19.0, 143.0, 14.0),
            margin_left: 50,
            margin_right: 20,
            margin_top: 20,
            margin_bottom: 40,
            x_ticks: (0..10).map( |i| 95.0 + 5.0 * i as f64).collect(),
            y_ticks: (0..7).map( |i| -15.0 + 5.0 * i as f64).collect(),
        }
    }
}

impl MapLayout {
    pub fn projection (&self)->MapProjection {
        let plot_w = self.width.saturating_sub( self.margin_left + self.margin_right) as f64;
        let plot_h = self.height.saturating_sub( self.margin_top + self.margin_bottom) as f64;
        let ext_w = self.extent.width();
        let ext_h = self.extent.height();

        let scale = if ext_w > 0.0 && ext_h > 0.0 { (plot_w / ext_w).min( plot_h / ext_h) } else { 1.0 };
        let x0 = self.margin_left as f64 + (plot_w - ext_w * scale) / 2.0;
        let y0 = self.margin_top as f64 + (plot_h - ext_h * scale) / 2.0;

        MapProjection { west: self.extent.west, north: self.extent.north, scale, x0, y0 }
    }

    /// font point size to pixels
    pub fn pt_to_px (&self, pt: f32)->f32 {
        pt * self.dpi / 72.0
    }

    /// pixel size of a `width` x `height` logo image. The zoom factor is relative to 72dpi
    pub fn logo_size (&self, width: u32, height: u32)->(u32,u32) {
        let zoom = LOGO_ZOOM * self.dpi as f64 / 72.0;
        ((width as f64 * zoom).round() as u32, (height as f64 * zoom).round() as u32)
    }
}

/// equirectangular mapping of lon/lat degrees to canvas pixels
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct MapProjection {
    west: f64,
    north: f64,
    scale: f64, // px per degree
    x0: f64,
    y0: f64,
}

impl MapProjection {
    pub fn to_pixel (&self, lon: f64, lat: f64)->(f32,f32) {
        let x = self.x0 + (lon - self.west) * self.scale;
        let y = self.y0 + (self.north - lat) * self.scale;
        (x as f32, y as f32)
    }

    pub fn to_pixel_i32 (&self, lon: f64, lat: f64)->(i32,i32) {
        let (x,y) = self.to_pixel( lon, lat);
        (x.round() as i32, y.round() as i32)
    }

    pub fn px_per_degree (&self)->f64 { self.scale }
}

/// RGBA colors and sizes of map elements
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub background: [u8;4],
    pub world_fill: [u8;4],
    pub indonesia_fill: [u8;4],
    pub edge: [u8;4],
    pub low: [u8;4],
    pub medium: [u8;4],
    pub high: [u8;4],
    pub box_fill: [u8;4],
    pub grid: [u8;4],
    pub text: [u8;4],
    pub marker_radius: i32,        // hotspot markers on the map
    pub legend_marker_radius: i32, // markers in legend and region box
    pub dash: (u32,u32),           // grid line dash and gap length in px
    pub tick_pt: f32,
    pub box_pt: f32,
    pub legend_pt: f32,
    pub title_pt: f32,
    pub text_pt: f32,
}

impl Default for MapStyle {
    fn default()->Self {
        MapStyle {
            background: [255,255,255,255],
            world_fill: [255,255,255,255],
            indonesia_fill: [211,211,211,255], // lightgrey
            edge: [0,0,0,255],
            low: [0,128,0,255],     // green
            medium: [255,255,0,255],
            high: [255,0,0,255],
            box_fill: [255,228,181,255], // moccasin
            grid: [128,128,128,255],
            text: [0,0,0,255],
            marker_radius: 3,
            legend_marker_radius: 6,
            dash: (6,4),
            tick_pt: 8.0,
            box_pt: 8.0,
            legend_pt: 9.0,
            title_pt: 11.0,
            text_pt: 10.0,
        }
    }
}

impl MapStyle {
    pub fn class_color (&self, class: ConfidenceClass)->Rgba<u8> {
        match class {
            ConfidenceClass::Low => Rgba(self.low),
            ConfidenceClass::Medium => Rgba(self.medium),
            ConfidenceClass::High => Rgba(self.high),
        }
    }
}

/* #endregion layout and style */

/// everything that goes into a map
pub struct MapInput<'a> {
    pub world: &'a BoundaryLayer,     // countries other than Indonesia
    pub indonesia: &'a BoundaryLayer, // Indonesian provinces
    pub hotspots: &'a [BmkgHotspot],
    pub counts: &'a RegionCounts,
    pub date: NaiveDate, // data date shown in the title block
    pub satellites: &'a str,
    pub logo: Option<&'a RgbaImage>,
}

// geographic anchors of map decorations
const LEGEND_ORIGIN: (f64,f64) = (96.0, -13.0); // lower left
const LEGEND_SIZE: (f64,f64) = (9.0, 5.0);
const REGION_BOX_ORIGIN: (f64,f64) = (127.5, 14.5); // upper left
const REGION_BOX_WIDTH: f64 = 15.0;
const REGION_ROW_HEIGHT: f64 = 0.6;
const TITLE_LON: f64 = 98.8;
const LOGO_CENTER: (f64,f64) = (97.3, -16.0);
const LOGO_ZOOM: f64 = 0.15;

enum HAlign { Left, Center, Right }
enum VAlign { Top, Center, Baseline }

pub struct MapRenderer {
    layout: MapLayout,
    style: MapStyle,
    font: Option<FontVec>,
    proj: MapProjection,
}

impl MapRenderer {
    pub fn new (layout: MapLayout, style: MapStyle, font: Option<FontVec>)->Self {
        let proj = layout.projection();
        MapRenderer { layout, style, font, proj }
    }

    pub fn projection (&self)->&MapProjection { &self.proj }

    pub fn render (&self, input: &MapInput)->RgbaImage {
        let mut img = RgbaImage::from_pixel( self.layout.width, self.layout.height, Rgba(self.style.background));

        self.draw_layer( &mut img, input.world, Rgba(self.style.world_fill));
        self.draw_layer( &mut img, input.indonesia, Rgba(self.style.indonesia_fill));
        self.draw_grid( &mut img);
        self.draw_hotspots( &mut img, input.hotspots);
        self.draw_frame( &mut img);
        self.draw_legend( &mut img);
        self.draw_region_box( &mut img, input.counts);
        self.draw_title( &mut img, input.date, input.satellites);

        if let Some(logo) = input.logo {
            self.draw_logo( &mut img, logo);
        }

        img
    }

    /* #region geometry **************************************************************************/

    fn draw_layer (&self, img: &mut RgbaImage, layer: &BoundaryLayer, fill: Rgba<u8>) {
        let edge = Rgba(self.style.edge);
        let background = Rgba(self.style.background);
        let mut n_drawn = 0;

        for area in layer.areas() {
            if !area.bbox.intersects( &self.layout.extent) { continue }

            for poly in area.shape.iter() {
                let exterior = self.ring_pixels( poly.exterior());
                if exterior.len() < 3 { continue }
                draw_polygon_mut( img, &exterior, fill);

                for hole in poly.interiors() {
                    let pts = self.ring_pixels( hole);
                    if pts.len() >= 3 {
                        draw_polygon_mut( img, &pts, background);
                    }
                }

                draw_closed_path( img, &exterior, edge);
                for hole in poly.interiors() {
                    draw_closed_path( img, &self.ring_pixels( hole), edge);
                }
            }
            n_drawn += 1;
        }
        debug!( n_drawn, "drawn boundary areas");
    }

    /// ring as pixel polygon without consecutive duplicates and without closing point
    fn ring_pixels (&self, ring: &LineString<f64>)->Vec<PxPoint<i32>> {
        let mut pts: Vec<PxPoint<i32>> = Vec::with_capacity( ring.0.len());
        for c in ring.coords() {
            let (x,y) = self.proj.to_pixel_i32( c.x, c.y);
            let p = PxPoint::new( x, y);
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        while pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        pts
    }

    fn draw_hotspots (&self, img: &mut RgbaImage, hotspots: &[BmkgHotspot]) {
        let r = self.style.marker_radius;

        for class in ConfidenceClass::ALL {  // low first so that high confidence markers end up on top
            let color = self.style.class_color( class);
            for hs in hotspots.iter().filter( |hs| hs.class() == Some(class)) {
                if self.layout.extent.contains( hs.lon, hs.lat) {
                    let center = self.proj.to_pixel_i32( hs.lon, hs.lat);
                    draw_filled_circle_mut( img, center, r, color);
                }
            }
        }
    }

    fn draw_grid (&self, img: &mut RgbaImage) {
        let color = Rgba(self.style.grid);
        let ext = &self.layout.extent;
        let scale = PxScale::from( self.layout.pt_to_px( self.style.tick_pt));
        let text_color = Rgba(self.style.text);

        for &lon in &self.layout.x_ticks {
            let top = self.proj.to_pixel( lon, ext.north);
            let bottom = self.proj.to_pixel( lon, ext.south);
            draw_dashed_line( img, top, bottom, self.style.dash, color);
            self.draw_text( img, &format!("{lon}"), (bottom.0, bottom.1 + 4.0), scale, HAlign::Center, VAlign::Top, text_color, false);
        }

        for &lat in &self.layout.y_ticks {
            let left = self.proj.to_pixel( ext.west, lat);
            let right = self.proj.to_pixel( ext.east, lat);
            draw_dashed_line( img, left, right, self.style.dash, color);
            self.draw_text( img, &format!("{lat}"), (left.0 - 4.0, left.1), scale, HAlign::Right, VAlign::Center, text_color, false);
        }
    }

    fn draw_frame (&self, img: &mut RgbaImage) {
        let ext = &self.layout.extent;
        if let Some(rect) = self.geo_rect( ext.west, ext.south, ext.east, ext.north) {
            draw_hollow_rect_mut( img, rect, Rgba(self.style.edge));
        }
    }

    fn geo_rect (&self, west: f64, south: f64, east: f64, north: f64)->Option<Rect> {
        let (x0,y0) = self.proj.to_pixel_i32( west, north);
        let (x1,y1) = self.proj.to_pixel_i32( east, south);
        if x1 > x0 && y1 > y0 {
            Some( Rect::at( x0, y0).of_size( (x1 - x0) as u32, (y1 - y0) as u32))
        } else {
            None
        }
    }

    fn draw_box (&self, img: &mut RgbaImage, west: f64, south: f64, east: f64, north: f64) {
        if let Some(rect) = self.geo_rect( west, south, east, north) {
            draw_filled_rect_mut( img, rect, Rgba(self.style.box_fill));
            draw_hollow_rect_mut( img, rect, Rgba(self.style.edge));
        }
    }

    fn draw_marker (&self, img: &mut RgbaImage, lon: f64, lat: f64, class: ConfidenceClass) {
        let center = self.proj.to_pixel_i32( lon, lat);
        let r = self.style.legend_marker_radius;
        draw_filled_circle_mut( img, center, r, self.style.class_color( class));
        draw_hollow_circle_mut( img, center, r, Rgba(self.style.edge));
    }

    fn draw_logo (&self, img: &mut RgbaImage, logo: &RgbaImage) {
        let (w,h) = self.layout.logo_size( logo.width(), logo.height());
        if w == 0 || h == 0 { return }

        let scaled = imageops::resize( logo, w, h, FilterType::Lanczos3);
        let (cx,cy) = self.proj.to_pixel_i32( LOGO_CENTER.0, LOGO_CENTER.1);
        imageops::overlay( img, &scaled, (cx - (w/2) as i32) as i64, (cy - (h/2) as i32) as i64);
    }

    /* #endregion geometry */

    /* #region annotations ***********************************************************************/

    fn draw_legend (&self, img: &mut RgbaImage) {
        let (x,y) = LEGEND_ORIGIN;
        let (w,h) = LEGEND_SIZE;
        self.draw_box( img, x, y, x + w, y + h);

        let scale = PxScale::from( self.layout.pt_to_px( self.style.legend_pt));
        let color = Rgba(self.style.text);

        self.draw_geo_text( img, "Tingkat Kepercayaan", x + w/2.0, y + 4.3, scale, HAlign::Center, VAlign::Baseline, true);

        for (class, dy) in ConfidenceClass::ALL.iter().zip( [3.2, 2.0, 0.8]) {
            self.draw_marker( img, x + 1.0, y + dy, *class);
            let pos = self.proj.to_pixel( x + 2.0, y + dy);
            self.draw_text( img, class.label(), pos, scale, HAlign::Left, VAlign::Center, color, false);
        }
    }

    fn draw_region_box (&self, img: &mut RgbaImage, counts: &RegionCounts) {
        let (x,y) = REGION_BOX_ORIGIN;
        let n = counts.regions.len() as f64;
        let box_height = (n + 2.0) * REGION_ROW_HEIGHT + 0.5;
        self.draw_box( img, x, y - box_height, x + REGION_BOX_WIDTH, y);

        let scale = PxScale::from( self.layout.pt_to_px( self.style.box_pt));

        self.draw_geo_text( img, &format!("{:<24}", "Wilayah"), x + 0.2, y - 0.5, scale, HAlign::Left, VAlign::Baseline, true);
        for (class, dx) in ConfidenceClass::ALL.iter().zip( [10.1, 11.9, 14.0]) {
            self.draw_marker( img, x + dx, y - 0.3, *class);
        }

        for (i, (region,c)) in counts.regions.iter().enumerate() {
            let label = count_label( &title_case( region), c.low, c.medium, c.high);
            let lat = y - (i as f64 + 1.2) * REGION_ROW_HEIGHT - 0.5;
            self.draw_geo_text( img, &label, x + 0.2, lat, scale, HAlign::Left, VAlign::Baseline, false);
        }

        let t = &counts.total;
        let label = count_label( "INDONESIA", t.low, t.medium, t.high);
        let lat = y - (n + 1.6) * REGION_ROW_HEIGHT - 0.5;
        self.draw_geo_text( img, &label, x + 0.2, lat, scale, HAlign::Left, VAlign::Baseline, true);
    }

    fn draw_title (&self, img: &mut RgbaImage, date: NaiveDate, satellites: &str) {
        let title_scale = PxScale::from( self.layout.pt_to_px( self.style.title_pt));
        let text_scale = PxScale::from( self.layout.pt_to_px( self.style.text_pt));

        self.draw_geo_text( img, "PETA SEBARAN HOTSPOT", TITLE_LON, -15.2, title_scale, HAlign::Left, VAlign::Baseline, true);
        self.draw_geo_text( img, &format!("Tanggal: {}", date.format("%d-%m-%Y")), TITLE_LON, -16.2, text_scale, HAlign::Left, VAlign::Baseline, false);
        self.draw_geo_text( img, &format!("Satelit: {satellites}"), TITLE_LON, -17.2, text_scale, HAlign::Left, VAlign::Baseline, false);
    }

    fn draw_geo_text (&self, img: &mut RgbaImage, text: &str, lon: f64, lat: f64, scale: PxScale, h: HAlign, v: VAlign, bold: bool) {
        let pos = self.proj.to_pixel( lon, lat);
        self.draw_text( img, text, pos, scale, h, v, Rgba(self.style.text), bold);
    }

    /// no-op without font. Bold is emulated by drawing twice with a one pixel offset
    fn draw_text (&self, img: &mut RgbaImage, text: &str, pos: (f32,f32), scale: PxScale, h: HAlign, v: VAlign, color: Rgba<u8>, bold: bool) {
        let Some(font) = &self.font else { return };

        let (w,_) = text_size( scale, font, text);
        let x = match h {
            HAlign::Left => pos.0,
            HAlign::Center => pos.0 - w as f32 / 2.0,
            HAlign::Right => pos.0 - w as f32,
        };

        let scaled = font.as_scaled( scale);
        let y = match v {
            VAlign::Top => pos.1,
            VAlign::Center => pos.1 - (scaled.ascent() - scaled.descent()) / 2.0,
            VAlign::Baseline => pos.1 - scaled.ascent(),
        };

        let (x,y) = (x.round() as i32, y.round() as i32);
        draw_text_mut( img, color, x, y, scale, font, text);
        if bold {
            draw_text_mut( img, color, x + 1, y, scale, font, text);
        }
    }

    /* #endregion annotations */
}

fn draw_closed_path (img: &mut RgbaImage, pts: &[PxPoint<i32>], color: Rgba<u8>) {
    if pts.len() < 2 { return }

    for (i,p) in pts.iter().enumerate() {
        let q = &pts[(i + 1) % pts.len()];
        draw_line_segment_mut( img, (p.x as f32, p.y as f32), (q.x as f32, q.y as f32), color);
    }
}

fn draw_dashed_line (img: &mut RgbaImage, start: (f32,f32), end: (f32,f32), dash: (u32,u32), color: Rgba<u8>) {
    let (dx,dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx*dx + dy*dy).sqrt();
    let period = (dash.0 + dash.1) as f32;
    if len <= 0.0 || dash.0 == 0 || period <= 0.0 { return }

    let (ux,uy) = (dx / len, dy / len);
    let mut d = 0.0;
    while d < len {
        let d1 = (d + dash.0 as f32).min( len);
        draw_line_segment_mut( img, (start.0 + ux*d, start.1 + uy*d), (start.0 + ux*d1, start.1 + uy*d1), color);
        d += period;
    }
}

/// region box row, e.g. "Sumatera                   12    3     0"
pub fn count_label (name: &str, low: usize, medium: usize, high: usize)->String {
    format!("{:<24} {:>4} {:>4} {:>5}", name, low, medium, high)
}

/// upper case the first letter of each word and lower case the rest
pub fn title_case (s: &str)->String {
    let mut res = String::with_capacity( s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if prev_alpha {
            res.extend( c.to_lowercase());
        } else {
            res.extend( c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    res
}

pub fn load_font (path: impl AsRef<Path>)->Result<FontVec> {
    let data = fs::read( path.as_ref())?;
    Ok( FontVec::try_from_vec( data)? )
}

pub fn load_logo (path: impl AsRef<Path>)->Result<RgbaImage> {
    Ok( image::open( path.as_ref())?.to_rgba8() )
}

pub fn save_png (img: &RgbaImage, path: impl AsRef<Path>)->Result<()> {
    let path = path.as_ref();
    img.save_with_format( path, ImageFormat::Png)?;
    info!( file=?path, "saved map");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!( title_case("KEPULAUAN NUSA TENGGARA"), "Kepulauan Nusa Tenggara");
        assert_eq!( title_case("sumatera-utara"), "Sumatera-Utara");
    }

    #[test]
    fn test_count_label() {
        let label = count_label( "Jawa", 1, 22, 333);
        assert_eq!( label.len(), 24 + 1 + 4 + 1 + 4 + 1 + 5);
        assert!( label.starts_with("Jawa "));
        assert!( label.ends_with("   22   333"));
    }

    #[test]
    fn test_logo_size() {
        let layout = MapLayout::default(); // 150dpi
        assert_eq!( layout.logo_size( 480, 240), (150, 75));

        let layout = MapLayout { dpi: 72.0, ..MapLayout::default() };
        assert_eq!( layout.logo_size( 480, 240), (72, 36));
    }

    #[test]
    fn test_projection() {
        let layout = MapLayout::default();
        let proj = layout.projection();

        let (x0,y0) = proj.to_pixel( 95.0, 14.0);
        let (x1,y1) = proj.to_pixel( 143.0, -19.0);
        assert!( x0 >= layout.margin_left as f32 && x1 <= (layout.width - layout.margin_right) as f32 + 0.01);
        assert!( y0 >= layout.margin_top as f32 && y1 <= (layout.height - layout.margin_bottom) as f32 + 0.01);

        // same scale on both axes
        let sx = (x1 - x0) / 48.0;
        let sy = (y1 - y0) / 33.0;
        assert!( (sx - sy).abs() < 1e-3);
    }
}
