use gtk::glib::Propagation;
use gtk::prelude::*;
use gtk::DrawingArea;
use gtk::Window;
use gtk::WindowType;

use crate::chart::Chart;
use crate::chart::HEIGHT;
use crate::chart::WIDTH;
use crate::Result;

/// Shows `chart` in a window and blocks until the window is closed.
pub fn show(chart: Chart) -> Result<()> {
    gtk::init()?;

    let window = Window::new(WindowType::Toplevel);
    window.set_title(&chart.style.title);
    window.set_default_size(WIDTH, HEIGHT);

    let drawing_area = DrawingArea::new();
    drawing_area.set_hexpand(true);
    drawing_area.set_vexpand(true);
    drawing_area.connect_draw(move |area, cr| {
        let width = f64::from(area.allocated_width());
        let height = f64::from(area.allocated_height());
        if let Err(err) = chart.draw(cr, width, height) {
            error!("Can't draw the chart: {}", err);
        }
        Propagation::Stop
    });
    window.add(&drawing_area);

    window.connect_delete_event(|_, _| {
        gtk::main_quit();
        Propagation::Proceed
    });
    window.show_all();

    info!("Showing the chart, close the window to exit");
    gtk::main();
    Ok(())
}
