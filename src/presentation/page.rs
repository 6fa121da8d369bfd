// Single page served by the shell. Renders the option set held by the
// chart engine and reports interaction back.
const INDEX_TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>Signal levels</title>
  <script src="https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js"></script>
</head>
<body>
  <div id="{{MOUNT}}" style="width: 100%; min-height: 320px"></div>
  <button id="export">Export PNG</button>
  <script>
    const mount = document.getElementById('{{MOUNT}}');
    let chart = null;

    function post(path, body) {
      return fetch(path, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
      });
    }

    function render(options) {
      echarts.dispose(mount);
      chart = echarts.init(mount);
      chart.setOption(options, true);
      chart.on('datazoom', () => {
        const zoom = chart.getOption().dataZoom[0];
        post('/chart/zoom', { start: zoom.start, end: zoom.end });
      });
    }

    async function load() {
      const reload = await post('/chart/reload', {});
      if (!reload.ok) {
        return;
      }
      const options = await fetch('/chart/options');
      if (options.ok) {
        render(await options.json());
      }
    }

    window.addEventListener('resize', () => {
      if (chart) {
        chart.resize();
        post('/chart/resize', { width: mount.clientWidth, height: mount.clientHeight });
      }
    });

    document.getElementById('export').addEventListener('click', async () => {
      const hidden = await post('/chart/export', { active: false });
      if (!chart || !hidden.ok) {
        return;
      }
      chart.setOption(await hidden.json(), true);
      const link = document.createElement('a');
      link.href = chart.getDataURL({ type: 'png', backgroundColor: '#fff' });
      link.download = (chart.getOption().toolbox[0].feature.saveAsImage.name || 'chart') + '.png';
      link.click();
      const shown = await post('/chart/export', { active: true });
      if (shown.ok) {
        chart.setOption(await shown.json(), true);
      }
    });

    load();
  </script>
</body>
</html>
"##;

pub fn render_index(mount: &str) -> String {
    INDEX_TEMPLATE.replace("{{MOUNT}}", mount)
}
